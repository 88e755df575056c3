//! Order Draft
//!
//! The single mutable entity of the booking flow. A draft is created with
//! defaults when the wizard starts, mutated field by field as the user
//! progresses, and discarded after submission. Nothing is persisted; uploaded
//! file references stay client-local.

use crate::catalog::{
    AcademicLevel, AddOn, CitationStyle, Language, PaymentMethod, ServiceKind, Urgency,
};
use crate::error::InputError;
use crate::wizard::WizardStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// In-progress, unsubmitted order data collected across the wizard steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    // Step 1: Service Selection
    pub service: Option<ServiceKind>,
    pub academic_field: String,
    pub academic_level: AcademicLevel,
    pub language: Language,

    // Step 2: Specifications
    pub pages: u32,
    pub citation_style: CitationStyle,
    pub references: u32,
    pub sources_preference: String,
    pub originality_confirmed: bool,

    // Step 3: Deadline
    pub deadline: Option<DateTime<Utc>>,
    pub urgency: Urgency,

    // Step 4: Materials
    pub topic: String,
    pub uploaded_files: Vec<PathBuf>,
    pub external_links: String,
    pub instructions: String,
    pub has_outline: bool,
    pub needs_consultation: bool,

    // Step 5: Pricing
    pub add_ons: Vec<AddOn>,
    /// Collected and transmitted, but never applied to the total.
    pub discount_code: String,

    // Step 6: Checkout
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment_method: Option<PaymentMethod>,
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            service: None,
            academic_field: String::new(),
            academic_level: AcademicLevel::Bachelor,
            language: Language::Albanian,
            pages: 10,
            citation_style: CitationStyle::Apa7,
            references: 10,
            sources_preference: String::new(),
            originality_confirmed: false,
            deadline: None,
            urgency: Urgency::Normal,
            topic: String::new(),
            uploaded_files: Vec::new(),
            external_links: String::new(),
            instructions: String::new(),
            has_outline: false,
            needs_consultation: false,
            add_ons: Vec::new(),
            discount_code: String::new(),
            contact_name: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            payment_method: None,
            terms_accepted: false,
            privacy_accepted: false,
        }
    }
}

impl OrderDraft {
    /// Create a fresh draft, optionally pre-selecting a service from a
    /// deep-link parameter.
    pub fn new(preselected: Option<ServiceKind>) -> Self {
        Self {
            service: preselected,
            ..Self::default()
        }
    }

    /// Toggle an add-on on or off. Selecting twice is a no-op.
    pub fn set_add_on(&mut self, add_on: AddOn, selected: bool) {
        if selected {
            if !self.add_ons.contains(&add_on) {
                self.add_ons.push(add_on);
            }
        } else {
            self.add_ons.retain(|a| *a != add_on);
        }
    }

    /// Required fields of the given step that are still empty.
    ///
    /// The interactive wizard warns about these on Next but only hard-blocks
    /// at submission; required-field enforcement is a deliberate choice, not
    /// inherited behaviour.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            WizardStep::ServiceSelection => {
                if self.service.is_none() {
                    missing.push("service type");
                }
                if self.academic_field.trim().is_empty() {
                    missing.push("academic field");
                }
            }
            WizardStep::Specifications => {
                if self.pages == 0 {
                    missing.push("page count");
                }
            }
            WizardStep::Deadline => {
                if self.deadline.is_none() {
                    missing.push("deadline");
                }
            }
            WizardStep::Materials => {
                if self.topic.trim().is_empty() {
                    missing.push("topic");
                }
            }
            WizardStep::Pricing => {}
            WizardStep::Checkout => {
                if self.contact_name.trim().is_empty() {
                    missing.push("full name");
                }
                if self.contact_email.trim().is_empty() {
                    missing.push("email");
                }
                if self.payment_method.is_none() {
                    missing.push("payment method");
                }
                if !self.terms_accepted {
                    missing.push("terms acceptance");
                }
                if !self.privacy_accepted {
                    missing.push("privacy acceptance");
                }
            }
        }
        missing
    }

    /// Validate a single step, reporting the first problem found.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), InputError> {
        if step == WizardStep::Specifications && self.pages == 0 {
            return Err(InputError::ZeroPages);
        }
        match self.missing_fields(step).into_iter().next() {
            Some(field) => Err(InputError::MissingField {
                step: step.title(),
                field,
            }),
            None => Ok(()),
        }
    }

    /// Conditions gating submission: both consents plus a payment method.
    pub fn checkout_blockers(&self) -> Vec<&'static str> {
        let mut blockers = Vec::new();
        if !self.terms_accepted {
            blockers.push("accept the terms & conditions");
        }
        if !self.privacy_accepted {
            blockers.push("accept the privacy policy");
        }
        if self.payment_method.is_none() {
            blockers.push("choose a payment method");
        }
        blockers
    }

    pub fn can_submit(&self) -> bool {
        self.checkout_blockers().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_form() {
        let draft = OrderDraft::default();
        assert_eq!(draft.service, None);
        assert_eq!(draft.academic_level, AcademicLevel::Bachelor);
        assert_eq!(draft.language, Language::Albanian);
        assert_eq!(draft.pages, 10);
        assert_eq!(draft.citation_style, CitationStyle::Apa7);
        assert_eq!(draft.references, 10);
        assert_eq!(draft.urgency, Urgency::Normal);
        assert!(!draft.can_submit());
    }

    #[test]
    fn test_preselected_service() {
        let draft = OrderDraft::new(Some(ServiceKind::Master));
        assert_eq!(draft.service, Some(ServiceKind::Master));
    }

    #[test]
    fn test_add_on_toggle_is_idempotent() {
        let mut draft = OrderDraft::default();
        draft.set_add_on(AddOn::Plagiarism, true);
        draft.set_add_on(AddOn::Plagiarism, true);
        assert_eq!(draft.add_ons, vec![AddOn::Plagiarism]);
        draft.set_add_on(AddOn::Plagiarism, false);
        assert!(draft.add_ons.is_empty());
    }

    #[test]
    fn test_missing_fields_per_step() {
        let mut draft = OrderDraft::default();
        assert_eq!(
            draft.missing_fields(WizardStep::ServiceSelection),
            vec!["service type", "academic field"]
        );

        draft.service = Some(ServiceKind::Seminar);
        draft.academic_field = "Psychology".into();
        assert!(draft.missing_fields(WizardStep::ServiceSelection).is_empty());

        assert_eq!(draft.missing_fields(WizardStep::Deadline), vec!["deadline"]);
        assert_eq!(draft.missing_fields(WizardStep::Materials), vec!["topic"]);
        assert!(draft.missing_fields(WizardStep::Pricing).is_empty());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let mut draft = OrderDraft::default();
        draft.pages = 0;
        assert_eq!(
            draft.validate_step(WizardStep::Specifications),
            Err(InputError::ZeroPages)
        );
    }

    #[test]
    fn test_checkout_blockers() {
        let mut draft = OrderDraft::default();
        assert_eq!(draft.checkout_blockers().len(), 3);

        draft.terms_accepted = true;
        draft.privacy_accepted = true;
        assert_eq!(draft.checkout_blockers(), vec!["choose a payment method"]);

        draft.payment_method = Some(PaymentMethod::BankTransfer);
        assert!(draft.can_submit());
    }
}
