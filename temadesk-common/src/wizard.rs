//! Booking Wizard State Machine
//!
//! A linear chain of six steps with no branching and no separate terminal
//! state: submission is an action available on the Checkout step, not a
//! seventh step. Navigation moves only to adjacent steps and clamps at both
//! ends. The wizard owns the draft for its whole lifetime; the quote is
//! recomputed on demand.

use crate::catalog::ServiceKind;
use crate::error::{Error, InputError};
use crate::intake::{OrderIntake, OrderReceipt};
use crate::order::OrderDraft;
use crate::pricing::{self, Quote};

/// The six fixed steps of the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    ServiceSelection,
    Specifications,
    Deadline,
    Materials,
    Pricing,
    Checkout,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::ServiceSelection,
        WizardStep::Specifications,
        WizardStep::Deadline,
        WizardStep::Materials,
        WizardStep::Pricing,
        WizardStep::Checkout,
    ];

    /// 1-based position shown in the progress indicator
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ServiceSelection => "Service Selection",
            WizardStep::Specifications => "Specifications",
            WizardStep::Deadline => "Deadline",
            WizardStep::Materials => "Materials",
            WizardStep::Pricing => "Pricing",
            WizardStep::Checkout => "Checkout",
        }
    }

    pub fn next(self) -> Option<Self> {
        let idx = self as usize;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        let idx = self as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::Checkout
    }
}

/// Sequences the six steps and carries the accumulated draft
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    pub draft: OrderDraft,
}

impl Wizard {
    pub fn new(preselected: Option<ServiceKind>) -> Self {
        Self {
            step: WizardStep::ServiceSelection,
            draft: OrderDraft::new(preselected),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Advance to the next step. A no-op on the Checkout step.
    pub fn go_next(&mut self) -> bool {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Return to the previous step. A no-op on the first step.
    pub fn go_previous(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Live quote for the current draft.
    pub fn quote(&self) -> Quote {
        pricing::quote(&self.draft)
    }

    pub fn can_submit(&self) -> bool {
        self.draft.can_submit()
    }

    /// Hand the draft to the order-intake collaborator.
    ///
    /// Rejected unless both consents are given and a payment method is chosen.
    /// On failure the draft is untouched and the user may correct and retry.
    pub fn submit(&self, intake: &dyn OrderIntake) -> Result<OrderReceipt, Error> {
        let blockers = self.draft.checkout_blockers();
        if !blockers.is_empty() {
            return Err(InputError::CheckoutIncomplete(blockers.join(", ")).into());
        }

        let quote = self.quote();
        let receipt = intake.submit_order(&self.draft, &quote)?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PaymentMethod;
    use crate::error::CollaboratorError;
    use crate::intake::StubIntake;

    #[test]
    fn test_steps_are_a_linear_chain() {
        assert_eq!(WizardStep::ServiceSelection.number(), 1);
        assert_eq!(WizardStep::Checkout.number(), 6);
        assert_eq!(WizardStep::ServiceSelection.previous(), None);
        assert_eq!(WizardStep::Checkout.next(), None);
        assert_eq!(
            WizardStep::Deadline.next(),
            Some(WizardStep::Materials)
        );
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut wizard = Wizard::new(None);
        assert!(!wizard.go_previous());
        assert_eq!(wizard.step(), WizardStep::ServiceSelection);

        for _ in 0..5 {
            assert!(wizard.go_next());
        }
        assert_eq!(wizard.step(), WizardStep::Checkout);
        assert!(!wizard.go_next());
        assert_eq!(wizard.step(), WizardStep::Checkout);

        assert!(wizard.go_previous());
        assert_eq!(wizard.step(), WizardStep::Pricing);
    }

    #[test]
    fn test_submit_gated_on_consents_and_payment() {
        let mut wizard = Wizard::new(Some(ServiceKind::Bachelor));

        let err = wizard.submit(&StubIntake).unwrap_err();
        assert!(matches!(
            err,
            Error::Input(InputError::CheckoutIncomplete(_))
        ));

        wizard.draft.terms_accepted = true;
        wizard.draft.privacy_accepted = true;
        assert!(wizard.submit(&StubIntake).is_err());

        wizard.draft.payment_method = Some(PaymentMethod::Moneygram);
        let receipt = wizard.submit(&StubIntake).unwrap();
        assert!(receipt.order_id.starts_with("TD-"));
    }

    #[test]
    fn test_failed_submission_keeps_draft() {
        struct FailingIntake;
        impl OrderIntake for FailingIntake {
            fn submit_order(
                &self,
                _draft: &OrderDraft,
                _quote: &Quote,
            ) -> Result<OrderReceipt, CollaboratorError> {
                Err(CollaboratorError::Intake("service unavailable".into()))
            }
        }

        let mut wizard = Wizard::new(Some(ServiceKind::Master));
        wizard.draft.terms_accepted = true;
        wizard.draft.privacy_accepted = true;
        wizard.draft.payment_method = Some(PaymentMethod::Ria);

        let before = wizard.draft.clone();
        assert!(wizard.submit(&FailingIntake).is_err());
        assert_eq!(wizard.draft, before);

        // retry against a working collaborator succeeds
        assert!(wizard.submit(&StubIntake).is_ok());
    }

    #[test]
    fn test_quote_follows_draft_mutations() {
        let mut wizard = Wizard::new(Some(ServiceKind::Coursework));
        let initial = wizard.quote();

        wizard.draft.pages = 20;
        let doubled = wizard.quote();
        assert_eq!(doubled.base, initial.base * rust_decimal::Decimal::TWO);
    }
}
