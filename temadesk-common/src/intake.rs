//! Order Intake Seam
//!
//! The wizard hands a finished draft to an order-intake collaborator through
//! this trait. The HTTP implementation lives in the CLI crate; the stub here
//! reproduces the observed behaviour of acknowledging the order locally. This
//! seam is where persistence and payment integration belong.

use crate::error::CollaboratorError;
use crate::order::OrderDraft;
use crate::pricing::Quote;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the order-intake collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Reference the customer quotes when following up
    pub order_id: String,
}

/// External collaborator that receives submitted orders
pub trait OrderIntake {
    fn submit_order(&self, draft: &OrderDraft, quote: &Quote)
        -> Result<OrderReceipt, CollaboratorError>;
}

/// Local stand-in used when no intake endpoint is configured.
///
/// Generates a timestamp-based order reference and accepts every order.
#[derive(Debug, Default)]
pub struct StubIntake;

impl OrderIntake for StubIntake {
    fn submit_order(
        &self,
        draft: &OrderDraft,
        quote: &Quote,
    ) -> Result<OrderReceipt, CollaboratorError> {
        let order_id = format!("TD-{}", Utc::now().format("%Y%m%d%H%M%S"));
        tracing::info!(
            "order {} accepted locally (service: {:?}, total: {} EUR)",
            order_id,
            draft.service,
            quote.total
        );
        Ok(OrderReceipt { order_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing;

    #[test]
    fn test_stub_accepts_and_issues_reference() {
        let draft = OrderDraft::default();
        let quote = pricing::quote(&draft);

        let receipt = StubIntake.submit_order(&draft, &quote).unwrap();
        assert!(receipt.order_id.starts_with("TD-"));
        assert_eq!(receipt.order_id.len(), "TD-".len() + 14);
    }
}
