//! Interactive Booking Wizard
//!
//! Drives the six-step flow over the wizard state machine from
//! `temadesk_common`: each iteration renders the prompts for the current step,
//! shows the live quote, then offers Next / Previous / Cancel (or Place order
//! on the Checkout step). Missing required fields only warn until submission,
//! which is hard-gated on the consents and payment method.

use crate::client;
use crate::Console;
use crate::quote;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::path::PathBuf;
use temadesk_common::catalog::{
    AcademicLevel, AddOn, CitationStyle, Language, PaymentMethod, ServiceKind, Urgency,
};
use temadesk_common::config::ClientConfig;
use temadesk_common::intake::{OrderIntake, OrderReceipt};
use temadesk_common::order::OrderDraft;
use temadesk_common::pricing;
use temadesk_common::session::{self, Session};
use temadesk_common::wizard::{Wizard, WizardStep};

#[derive(Debug, Clone, Copy)]
enum Nav {
    Next,
    Previous,
    Submit,
    Cancel,
}

pub fn cmd_book(
    console: &Console,
    config: &ClientConfig,
    preselected: Option<ServiceKind>,
) -> Result<()> {
    let intake = client::intake_from_config(config)?;

    if let Some(path) = session::default_session_path() {
        if let Some(session) = Session::load(&path) {
            console.log(format!("👋 Welcome back, {}!", session.display_name()));
        }
    }
    console.log("📝 Book Your Order - complete the six steps to get an instant quote.");

    let mut wizard = Wizard::new(preselected);
    loop {
        let step = wizard.step();
        console.log(format!("\n[{}/6] {}", step.number(), step.title()));

        match step {
            WizardStep::ServiceSelection => step_service(&mut wizard.draft)?,
            WizardStep::Specifications => step_specifications(&mut wizard.draft)?,
            WizardStep::Deadline => step_deadline(&mut wizard.draft)?,
            WizardStep::Materials => step_materials(console, &mut wizard.draft)?,
            WizardStep::Pricing => step_pricing(console, &mut wizard.draft)?,
            WizardStep::Checkout => step_checkout(console, &mut wizard.draft)?,
        }

        console.log(format!("\nCurrent total: €{}", wizard.quote().total));
        let missing = wizard.draft.missing_fields(step);
        if !missing.is_empty() {
            console.warn(format!(
                "Still needed before submission: {}",
                missing.join(", ")
            ));
        }

        match nav_menu(&wizard)? {
            Nav::Next => {
                wizard.go_next();
            }
            Nav::Previous => {
                wizard.go_previous();
            }
            Nav::Submit => {
                if let Some(receipt) = try_submit(console, &wizard, intake.as_ref())? {
                    report_confirmation(console, &wizard, &receipt);
                    return Ok(());
                }
                // stay on Checkout with the draft intact
            }
            Nav::Cancel => {
                let discard = Confirm::new()
                    .with_prompt("Discard this order draft?")
                    .default(false)
                    .interact()?;
                if discard {
                    console.log("Cancelled. Nothing was submitted.");
                    return Ok(());
                }
            }
        }
    }
}

fn nav_menu(wizard: &Wizard) -> Result<Nav> {
    let step = wizard.step();
    let mut items: Vec<String> = Vec::new();
    let mut actions: Vec<Nav> = Vec::new();

    if step.is_last() {
        items.push(format!("Place order - €{}", wizard.quote().total));
        actions.push(Nav::Submit);
    } else {
        items.push("Next step".to_string());
        actions.push(Nav::Next);
    }
    if step.previous().is_some() {
        items.push("Previous step".to_string());
        actions.push(Nav::Previous);
    }
    items.push("Cancel".to_string());
    actions.push(Nav::Cancel);

    let choice = Select::new()
        .with_prompt("Continue")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(actions[choice])
}

fn try_submit(
    console: &Console,
    wizard: &Wizard,
    intake: &dyn OrderIntake,
) -> Result<Option<OrderReceipt>> {
    let blockers = wizard.draft.checkout_blockers();
    if !blockers.is_empty() {
        console.warn(format!(
            "Before placing the order you must: {}",
            blockers.join(", ")
        ));
        return Ok(None);
    }

    // Blocking call under the spinner; no second submission can start
    // while this one is in flight.
    let spinner = console.spinner("Submitting your order...");
    let result = wizard.submit(intake);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(receipt) => Ok(Some(receipt)),
        Err(e) => {
            console.error(&e);
            console.log("Your draft is unchanged - you can correct it and retry.");
            Ok(None)
        }
    }
}

fn report_confirmation(console: &Console, wizard: &Wizard, receipt: &OrderReceipt) {
    let quote = wizard.quote();
    console.success("Order submitted! You'll receive a confirmation email shortly.");
    console.log(format!("   Reference: {}", receipt.order_id));
    console.log(format!("   Total due: €{}", quote.total));
    if let Some(method) = wizard.draft.payment_method {
        console.log(format!("   Payment:   {}", method.label()));
        console.log(
            "\n💡 Next steps: contact us on WhatsApp to receive the payment details \
             for your chosen method.",
        );
    }
}

fn step_service(draft: &mut OrderDraft) -> Result<()> {
    let services: Vec<String> = ServiceKind::ALL
        .iter()
        .map(|s| format!("{} (from €{})", s.label(), s.base_price()))
        .collect();
    let default = draft
        .service
        .and_then(|s| ServiceKind::ALL.iter().position(|x| *x == s))
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Type of work")
        .items(&services)
        .default(default)
        .interact()?;
    draft.service = Some(ServiceKind::ALL[idx]);

    let field: String = Input::new()
        .with_prompt("Academic field / major (e.g. Business Administration)")
        .with_initial_text(draft.academic_field.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.academic_field = field.trim().to_string();

    let levels: Vec<&str> = AcademicLevel::ALL.iter().map(|l| l.label()).collect();
    let default = AcademicLevel::ALL
        .iter()
        .position(|l| *l == draft.academic_level)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Academic level")
        .items(&levels)
        .default(default)
        .interact()?;
    draft.academic_level = AcademicLevel::ALL[idx];

    let languages: Vec<String> = Language::ALL
        .iter()
        .map(|l| format!("{}{}", l.label(), quote::surcharge_note(l.multiplier())))
        .collect();
    let default = Language::ALL
        .iter()
        .position(|l| *l == draft.language)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Language")
        .items(&languages)
        .default(default)
        .interact()?;
    draft.language = Language::ALL[idx];

    Ok(())
}

fn step_specifications(draft: &mut OrderDraft) -> Result<()> {
    draft.pages = Input::new()
        .with_prompt("Number of pages")
        .default(draft.pages)
        .validate_with(|pages: &u32| -> Result<(), &str> {
            if *pages >= 1 {
                Ok(())
            } else {
                Err("page count must be at least 1")
            }
        })
        .interact_text()?;

    let styles: Vec<&str> = CitationStyle::ALL.iter().map(|s| s.label()).collect();
    let default = CitationStyle::ALL
        .iter()
        .position(|s| *s == draft.citation_style)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Citation style")
        .items(&styles)
        .default(default)
        .interact()?;
    draft.citation_style = CitationStyle::ALL[idx];

    draft.references = Input::new()
        .with_prompt("Minimum number of references")
        .default(draft.references)
        .interact_text()?;

    let sources: String = Input::new()
        .with_prompt("Sources preference (e.g. Google Scholar, PubMed)")
        .with_initial_text(draft.sources_preference.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.sources_preference = sources.trim().to_string();

    draft.originality_confirmed = Confirm::new()
        .with_prompt("I understand the work must be 100% original")
        .default(draft.originality_confirmed)
        .interact()?;

    Ok(())
}

fn step_deadline(draft: &mut OrderDraft) -> Result<()> {
    let current = draft
        .deadline
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let input: String = Input::new()
        .with_prompt("Deadline (YYYY-MM-DD or YYYY-MM-DD HH:MM, empty to decide later)")
        .with_initial_text(current)
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), &str> {
            if s.trim().is_empty() || parse_deadline(s).is_some() {
                Ok(())
            } else {
                Err("use YYYY-MM-DD or YYYY-MM-DD HH:MM")
            }
        })
        .interact_text()?;
    draft.deadline = parse_deadline(&input);

    let urgencies: Vec<String> = Urgency::ALL
        .iter()
        .map(|u| format!("{}{}", u.label(), quote::urgency_note(*u)))
        .collect();
    let default = Urgency::ALL
        .iter()
        .position(|u| *u == draft.urgency)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Urgency level")
        .items(&urgencies)
        .default(default)
        .interact()?;
    draft.urgency = Urgency::ALL[idx];

    Ok(())
}

fn step_materials(console: &Console, draft: &mut OrderDraft) -> Result<()> {
    let topic: String = Input::new()
        .with_prompt("Topic / proposed title")
        .with_initial_text(draft.topic.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.topic = topic.trim().to_string();

    let files: String = Input::new()
        .with_prompt("Attach files (comma-separated paths, empty for none)")
        .allow_empty(true)
        .interact_text()?;
    draft.uploaded_files = files
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect();
    for path in &draft.uploaded_files {
        if !path.exists() {
            console.warn(format!("File not found: {}", path.display()));
        }
    }

    let links: String = Input::new()
        .with_prompt("External links (Google Drive, etc.)")
        .with_initial_text(draft.external_links.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.external_links = links.trim().to_string();

    let instructions: String = Input::new()
        .with_prompt("Professor instructions / special requirements")
        .with_initial_text(draft.instructions.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.instructions = instructions.trim().to_string();

    draft.has_outline = Confirm::new()
        .with_prompt("I already have an outline prepared")
        .default(draft.has_outline)
        .interact()?;
    draft.needs_consultation = Confirm::new()
        .with_prompt("I need a consultation before starting")
        .default(draft.needs_consultation)
        .interact()?;

    Ok(())
}

fn step_pricing(console: &Console, draft: &mut OrderDraft) -> Result<()> {
    let items: Vec<(String, bool)> = AddOn::ALL
        .iter()
        .map(|a| {
            (
                format!("{} (+€{})", a.label(), a.price()),
                draft.add_ons.contains(a),
            )
        })
        .collect();
    let selected = MultiSelect::new()
        .with_prompt("Optional add-ons (space to toggle, enter to confirm)")
        .items_checked(&items)
        .interact()?;
    draft.add_ons = selected.into_iter().map(|i| AddOn::ALL[i]).collect();

    let code: String = Input::new()
        .with_prompt("Discount code (empty for none)")
        .with_initial_text(draft.discount_code.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.discount_code = code.trim().to_string();
    if !draft.discount_code.is_empty() {
        // Codes are recorded with the order; they are resolved manually by
        // the team and never change the quoted total here.
        console.log("Discount code noted - our team will apply it when confirming your order.");
    }

    console.log("");
    quote::print_quote(console, draft, &pricing::quote(draft));

    Ok(())
}

fn step_checkout(console: &Console, draft: &mut OrderDraft) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Full name")
        .with_initial_text(draft.contact_name.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.contact_name = name.trim().to_string();

    let email: String = Input::new()
        .with_prompt("Email")
        .with_initial_text(draft.contact_email.clone())
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), &str> {
            if s.trim().is_empty() || s.contains('@') {
                Ok(())
            } else {
                Err("enter a valid email address")
            }
        })
        .interact_text()?;
    draft.contact_email = email.trim().to_string();

    let phone: String = Input::new()
        .with_prompt("Phone number (e.g. +355..., empty to skip)")
        .with_initial_text(draft.contact_phone.clone())
        .allow_empty(true)
        .interact_text()?;
    draft.contact_phone = phone.trim().to_string();

    let methods: Vec<String> = PaymentMethod::ALL
        .iter()
        .map(|m| format!("{} - {}", m.label(), m.description()))
        .collect();
    let default = draft
        .payment_method
        .and_then(|m| PaymentMethod::ALL.iter().position(|x| *x == m))
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Payment method")
        .items(&methods)
        .default(default)
        .interact()?;
    draft.payment_method = Some(PaymentMethod::ALL[idx]);
    console.log(
        "After placing your order, contact us on WhatsApp to receive the payment \
         details for your chosen method.",
    );

    draft.terms_accepted = Confirm::new()
        .with_prompt("I agree to the Terms & Conditions and Refund Policy")
        .default(draft.terms_accepted)
        .interact()?;
    draft.privacy_accepted = Confirm::new()
        .with_prompt("I agree to the Privacy Policy and Academic Integrity Disclaimer")
        .default(draft.privacy_accepted)
        .interact()?;

    print_summary(console, draft);
    Ok(())
}

fn print_summary(console: &Console, draft: &OrderDraft) {
    console.log("\nOrder Summary");
    if let Some(service) = draft.service {
        console.log(format!("   Service:  {}", service.label()));
    }
    console.log(format!("   Pages:    {}", draft.pages));
    console.log(format!("   Urgency:  {}", draft.urgency.label()));
    if let Some(deadline) = draft.deadline {
        console.log(format!(
            "   Deadline: {}",
            deadline.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(method) = draft.payment_method {
        console.log(format!("   Payment:  {}", method.label()));
    }
    console.log(format!("   Total:    €{}", pricing::quote(draft).total));
}

/// Parse "YYYY-MM-DD HH:MM" or bare "YYYY-MM-DD" (end of day) as UTC.
fn parse_deadline(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(23, 59, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deadline_with_time() {
        let parsed = parse_deadline("2026-09-15 14:30").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2026-09-15 14:30");
    }

    #[test]
    fn test_parse_deadline_date_only_is_end_of_day() {
        let parsed = parse_deadline(" 2026-09-15 ").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "23:59");
    }

    #[test]
    fn test_parse_deadline_rejects_garbage() {
        assert_eq!(parse_deadline("soon"), None);
        assert_eq!(parse_deadline("15/09/2026"), None);
        assert_eq!(parse_deadline(""), None);
    }
}
