use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoicely_core::{DomainError, ProductId};

/// Why a proposed stock adjustment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The adjustment would not change anything.
    #[error("Adjustment cannot be zero")]
    ZeroDelta,

    /// More units were removed than are on hand.
    #[error("Insufficient quantity. Available: {available}, Requested: {requested}")]
    WouldGoNegative { requested: u64, available: u64 },

    /// The resulting quantity does not fit the stock counter.
    #[error("Adjustment exceeds the maximum stock quantity")]
    Overflow,
}

impl RejectionReason {
    /// Units missing to satisfy the request, for `WouldGoNegative`.
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            RejectionReason::WouldGoNegative {
                requested,
                available,
            } => Some(requested.saturating_sub(*available)),
            _ => None,
        }
    }
}

impl From<RejectionReason> for DomainError {
    fn from(value: RejectionReason) -> Self {
        match value {
            RejectionReason::WouldGoNegative { .. } => DomainError::invariant(value.to_string()),
            RejectionReason::ZeroDelta | RejectionReason::Overflow => {
                DomainError::validation(value.to_string())
            }
        }
    }
}

/// Compute the quantity that would result from applying `delta` to
/// `current_quantity`, refusing zero deltas and anything that drives stock
/// below zero.
pub fn propose_adjustment(current_quantity: u64, delta: i64) -> Result<u64, RejectionReason> {
    if delta == 0 {
        return Err(RejectionReason::ZeroDelta);
    }

    let new_quantity = i128::from(current_quantity) + i128::from(delta);
    if new_quantity < 0 {
        return Err(RejectionReason::WouldGoNegative {
            requested: delta.unsigned_abs(),
            available: current_quantity,
        });
    }

    u64::try_from(new_quantity).map_err(|_| RejectionReason::Overflow)
}

/// Body of the backend's adjust-quantity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustQuantityRequest {
    pub adjustment: i64,
}

/// Lifecycle of a single adjustment: `Idle -> Validating -> {Accepted, Rejected}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentState {
    Idle,
    Validating,
    Accepted { new_quantity: u64 },
    Rejected(RejectionReason),
}

impl AdjustmentState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AdjustmentState::Accepted { .. } | AdjustmentState::Rejected(_)
        )
    }
}

/// A signed delta proposed against a product's on-hand quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityAdjustment {
    product_id: ProductId,
    current_quantity: u64,
    delta: i64,
    state: AdjustmentState,
}

impl QuantityAdjustment {
    pub fn new(product_id: ProductId, current_quantity: u64, delta: i64) -> Self {
        Self {
            product_id,
            current_quantity,
            delta,
            state: AdjustmentState::Idle,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn current_quantity(&self) -> u64 {
        self.current_quantity
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn state(&self) -> AdjustmentState {
        self.state
    }

    /// Run the guard once. Later calls return the recorded outcome.
    pub fn evaluate(&mut self) -> Result<u64, RejectionReason> {
        match self.state {
            AdjustmentState::Accepted { new_quantity } => return Ok(new_quantity),
            AdjustmentState::Rejected(reason) => return Err(reason),
            AdjustmentState::Idle | AdjustmentState::Validating => {}
        }

        self.state = AdjustmentState::Validating;
        let outcome = propose_adjustment(self.current_quantity, self.delta);
        self.state = match outcome {
            Ok(new_quantity) => AdjustmentState::Accepted { new_quantity },
            Err(reason) => {
                tracing::debug!(
                    product_id = %self.product_id,
                    delta = self.delta,
                    current_quantity = self.current_quantity,
                    %reason,
                    "quantity adjustment rejected"
                );
                AdjustmentState::Rejected(reason)
            }
        };
        outcome
    }

    /// Request body for an accepted adjustment.
    pub fn request(&self) -> Option<AdjustQuantityRequest> {
        match self.state {
            AdjustmentState::Accepted { .. } => Some(AdjustQuantityRequest {
                adjustment: self.delta,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product_id() -> ProductId {
        "prod-1".parse().unwrap()
    }

    #[test]
    fn removing_part_of_the_stock_is_accepted() {
        assert_eq!(propose_adjustment(10, -5), Ok(5));
    }

    #[test]
    fn adding_stock_is_accepted() {
        assert_eq!(propose_adjustment(0, 12), Ok(12));
    }

    #[test]
    fn removing_everything_lands_on_zero() {
        assert_eq!(propose_adjustment(7, -7), Ok(0));
    }

    #[test]
    fn zero_delta_is_rejected() {
        assert_eq!(propose_adjustment(10, 0), Err(RejectionReason::ZeroDelta));
    }

    #[test]
    fn overdraw_reports_shortfall() {
        let err = propose_adjustment(3, -10).unwrap_err();
        assert_eq!(
            err,
            RejectionReason::WouldGoNegative {
                requested: 10,
                available: 3
            }
        );
        assert_eq!(err.shortfall(), Some(7));
        assert_eq!(
            err.to_string(),
            "Insufficient quantity. Available: 3, Requested: 10"
        );
    }

    #[test]
    fn shortfall_of_a_decoded_rejection_never_underflows() {
        let reason: RejectionReason = serde_json::from_value(serde_json::json!({
            "reason": "would_go_negative",
            "requested": 1,
            "available": 5
        }))
        .unwrap();
        assert_eq!(reason.shortfall(), Some(0));
    }

    #[test]
    fn extreme_negative_delta_does_not_overflow() {
        let err = propose_adjustment(0, i64::MIN).unwrap_err();
        assert_eq!(err.shortfall(), Some(i64::MIN.unsigned_abs()));
    }

    #[test]
    fn exceeding_u64_is_rejected() {
        assert_eq!(
            propose_adjustment(u64::MAX, 1),
            Err(RejectionReason::Overflow)
        );
    }

    #[test]
    fn rejection_maps_to_domain_error() {
        let err: DomainError = RejectionReason::ZeroDelta.into();
        assert_eq!(err, DomainError::validation("Adjustment cannot be zero"));

        let err: DomainError = RejectionReason::WouldGoNegative {
            requested: 4,
            available: 1,
        }
        .into();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn evaluate_walks_idle_to_accepted() {
        let mut adj = QuantityAdjustment::new(test_product_id(), 10, -5);
        assert_eq!(adj.state(), AdjustmentState::Idle);
        assert_eq!(adj.request(), None);

        assert_eq!(adj.evaluate(), Ok(5));
        assert_eq!(adj.state(), AdjustmentState::Accepted { new_quantity: 5 });
        assert!(adj.state().is_terminal());
        assert_eq!(
            adj.request(),
            Some(AdjustQuantityRequest { adjustment: -5 })
        );
    }

    #[test]
    fn evaluate_walks_idle_to_rejected() {
        let mut adj = QuantityAdjustment::new(test_product_id(), 2, -3);
        let err = adj.evaluate().unwrap_err();
        assert_eq!(adj.state(), AdjustmentState::Rejected(err));
        assert_eq!(adj.request(), None);
    }

    #[test]
    fn evaluate_is_single_shot() {
        let mut adj = QuantityAdjustment::new(test_product_id(), 10, 0);
        let first = adj.evaluate();
        let second = adj.evaluate();
        assert_eq!(first, second);
        assert_eq!(adj.state(), AdjustmentState::Rejected(RejectionReason::ZeroDelta));
    }

    #[test]
    fn request_body_matches_backend_shape() {
        let body = serde_json::to_value(AdjustQuantityRequest { adjustment: -5 }).unwrap();
        assert_eq!(body, serde_json::json!({ "adjustment": -5 }));
    }

    #[test]
    fn rejection_serializes_with_reason_tag() {
        let value = serde_json::to_value(RejectionReason::WouldGoNegative {
            requested: 10,
            available: 3,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "reason": "would_go_negative", "requested": 10, "available": 3 })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: an accepted adjustment is exact arithmetic.
            #[test]
            fn accepted_quantity_is_current_plus_delta(
                current in 0u64..1_000_000,
                delta in -1_000_000i64..1_000_000
            ) {
                match propose_adjustment(current, delta) {
                    Ok(new_quantity) => {
                        prop_assert_ne!(delta, 0);
                        prop_assert_eq!(new_quantity as i128, current as i128 + delta as i128);
                    }
                    Err(RejectionReason::ZeroDelta) => prop_assert_eq!(delta, 0),
                    Err(RejectionReason::WouldGoNegative { requested, available }) => {
                        prop_assert_eq!(available, current);
                        prop_assert_eq!(requested, delta.unsigned_abs());
                        prop_assert!(requested > available);
                    }
                    Err(RejectionReason::Overflow) => prop_assert!(false, "unexpected overflow"),
                }
            }

            /// Property: the guard never yields a negative result, whatever the inputs.
            #[test]
            fn never_accepts_a_shortfall(current in any::<u64>(), delta in any::<i64>()) {
                if let Ok(new_quantity) = propose_adjustment(current, delta) {
                    prop_assert!(delta >= 0 || current >= delta.unsigned_abs());
                    prop_assert!(new_quantity != current);
                }
            }
        }
    }
}
