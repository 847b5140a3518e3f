//! Status transition policy
//!
//! The default policy is permissive: any status may follow any status,
//! which lets staff correct mistakes (e.g. reopen a completed order). The
//! strict policy enforces this table:
//!
//! ```text
//! pending   -> preparing | completed | cancelled
//! preparing -> pending | completed | cancelled
//! completed -> (terminal)
//! cancelled -> (terminal)
//! ```
//!
//! Re-applying the current status is allowed under both policies.

use crate::error::{OrderError, OrderResult};
use crate::types::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn check(&self, from: OrderStatus, to: OrderStatus) -> OrderResult<()> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if strict_allows(from, to) => Ok(()),
            TransitionPolicy::Strict => Err(OrderError::Validation(format!(
                "cannot move order from {} to {}",
                from, to
            ))),
        }
    }
}

fn strict_allows(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    if from == to {
        return true;
    }
    match from {
        Pending => matches!(to, Preparing | Completed | Cancelled),
        Preparing => matches!(to, Pending | Completed | Cancelled),
        Completed | Cancelled => false,
    }
}
