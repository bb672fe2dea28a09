//! Optimistic on-hand quantity for a product screen.
//!
//! An accepted adjustment is shown immediately; the backend answer then either
//! confirms the new quantity or the pending delta is rolled back.

use thiserror::Error;

use invoicely_core::ProductId;

use crate::adjustment::{AdjustQuantityRequest, RejectionReason, propose_adjustment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    #[error("an adjustment for product {0} is already awaiting confirmation")]
    InFlight(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAdjustment {
    delta: i64,
    projected: u64,
}

/// Last server-confirmed quantity plus at most one in-flight adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticStock {
    product_id: ProductId,
    confirmed: u64,
    pending: Option<PendingAdjustment>,
    version: u64,
}

impl OptimisticStock {
    pub fn new(product_id: ProductId, confirmed: u64) -> Self {
        Self {
            product_id,
            confirmed,
            pending: None,
            version: 0,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn confirmed(&self) -> u64 {
        self.confirmed
    }

    /// Quantity to render: the projected value while an adjustment is in flight.
    pub fn displayed(&self) -> u64 {
        self.pending.map_or(self.confirmed, |p| p.projected)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of server confirmations applied so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Guard `delta` against the confirmed quantity and, if accepted, show the
    /// projected quantity until the backend answers.
    pub fn begin(&mut self, delta: i64) -> Result<AdjustQuantityRequest, StockError> {
        if self.pending.is_some() {
            return Err(StockError::InFlight(self.product_id.clone()));
        }

        let projected = propose_adjustment(self.confirmed, delta)?;
        self.pending = Some(PendingAdjustment { delta, projected });

        tracing::debug!(
            product_id = %self.product_id,
            delta,
            projected,
            "optimistic stock adjustment started"
        );

        Ok(AdjustQuantityRequest { adjustment: delta })
    }

    /// Record the quantity reported by the backend after a successful call.
    pub fn confirm(&mut self, server_quantity: u64) {
        if let Some(pending) = self.pending.take() {
            if pending.projected != server_quantity {
                // Someone else moved stock between load and adjust.
                tracing::debug!(
                    product_id = %self.product_id,
                    projected = pending.projected,
                    server_quantity,
                    "server quantity differs from optimistic projection"
                );
            }
        }
        self.confirmed = server_quantity;
        self.version += 1;
    }

    /// Drop the in-flight adjustment, returning its delta.
    pub fn rollback(&mut self) -> Option<i64> {
        let pending = self.pending.take()?;
        tracing::debug!(
            product_id = %self.product_id,
            delta = pending.delta,
            "optimistic stock adjustment rolled back"
        );
        Some(pending.delta)
    }
}
