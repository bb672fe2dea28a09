//! `invoicely-core` — building blocks shared by the client crates.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{ClientId, ProductId};
