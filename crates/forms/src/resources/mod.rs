//! Request bodies and form schemas for each backend resource.
//!
//! Each module pairs a typed request struct (decoded by
//! [`prepare_request`](crate::prepare_request)) with the [`ObjectSchema`](crate::ObjectSchema)
//! its create/edit screen validates against.

mod de;

pub mod client;
pub mod expense;
pub mod invoice;
pub mod product;
pub mod user;
