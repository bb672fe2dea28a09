//! Inventory quantity adjustments (client side).
//!
//! The guard here is advisory: it gives immediate feedback before a stock
//! adjustment is sent, while the backend stays authoritative and re-validates
//! non-negativity on its own. Everything in this crate is deterministic
//! (no IO, no HTTP, no storage).

pub mod adjustment;
pub mod stock;

pub use adjustment::{
    AdjustQuantityRequest, AdjustmentState, QuantityAdjustment, RejectionReason,
    propose_adjustment,
};
pub use stock::{OptimisticStock, StockError};
