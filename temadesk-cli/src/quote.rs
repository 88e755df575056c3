//! Quote and catalog commands
//!
//! `temadesk quote` prices a hypothetical order from flags, reusing the same
//! calculator the wizard displays live. `temadesk services` lists the catalog.

use crate::Console;
use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use temadesk_common::catalog::{
    AddOn, CitationStyle, Language, PaymentMethod, ServiceKind, Urgency, REFERENCE_PAGE_COUNT,
};
use temadesk_common::error::InputError;
use temadesk_common::order::OrderDraft;
use temadesk_common::pricing::{self, Quote};
use temadesk_common::wizard::WizardStep;

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Service id (e.g. bachelor, master, seminar)
    #[arg(long)]
    pub service: ServiceKind,

    /// Number of pages
    #[arg(long, default_value_t = 10)]
    pub pages: u32,

    /// Urgency id: normal, urgent, very-urgent
    #[arg(long, default_value = "normal")]
    pub urgency: Urgency,

    /// Language id: albanian, english, italian
    #[arg(long, default_value = "albanian")]
    pub language: Language,

    /// Add-on id, repeatable (powerpoint, spss-addon, plagiarism, express)
    #[arg(long = "add-on", value_name = "ADD_ON")]
    pub add_ons: Vec<AddOn>,
}

impl QuoteArgs {
    pub fn to_draft(&self) -> Result<OrderDraft, InputError> {
        let mut draft = OrderDraft::new(Some(self.service));
        draft.pages = self.pages;
        draft.urgency = self.urgency;
        draft.language = self.language;
        for add_on in &self.add_ons {
            draft.set_add_on(*add_on, true);
        }
        draft.validate_step(WizardStep::Specifications)?;
        Ok(draft)
    }
}

pub fn cmd_quote(console: &Console, args: &QuoteArgs) -> Result<()> {
    let draft = args.to_draft()?;
    let quote = pricing::quote(&draft);

    console.log(format!(
        "💰 Quote for {} ({} pages, {})\n",
        args.service.label(),
        args.pages,
        args.urgency.label()
    ));
    print_quote(console, &draft, &quote);
    Ok(())
}

/// Render the price breakdown the way the wizard's Pricing step shows it.
/// Zero fee lines are omitted, matching the live quote display.
pub fn print_quote(console: &Console, draft: &OrderDraft, quote: &Quote) {
    console.log("Price Breakdown");
    console.log(format!(
        "   Base Price ({} pages)    €{}",
        draft.pages, quote.base
    ));
    if quote.urgency_fee > dec!(0) {
        console.log(format!("   Urgency Fee             +€{}", quote.urgency_fee));
    }
    if quote.language_fee > dec!(0) {
        console.log(format!("   Language Fee            +€{}", quote.language_fee));
    }
    if quote.add_ons_fee > dec!(0) {
        console.log(format!("   Add-ons                 +€{}", quote.add_ons_fee));
    }
    console.log(format!("   Total                    €{}", quote.total));
}

pub fn cmd_services(console: &Console) -> Result<()> {
    console.log("📚 Services\n");
    for service in ServiceKind::ALL {
        console.log(format!(
            "   {:12} {:28} from €{} ({} pages)",
            service.id(),
            service.label(),
            service.base_price(),
            REFERENCE_PAGE_COUNT
        ));
    }

    console.log("\n🌐 Languages");
    for language in Language::ALL {
        console.log(format!(
            "   {:12} {}{}",
            language.id(),
            language.label(),
            surcharge_note(language.multiplier())
        ));
    }

    console.log("\n⏱  Urgency");
    for urgency in Urgency::ALL {
        console.log(format!(
            "   {:12} {}{}",
            urgency.id(),
            urgency.label(),
            urgency_note(urgency)
        ));
    }

    console.log("\n➕ Add-ons (flat)");
    for add_on in AddOn::ALL {
        console.log(format!(
            "   {:12} {:28} +€{}",
            add_on.id(),
            add_on.label(),
            add_on.price()
        ));
    }

    console.log("\n📖 Citation styles");
    let styles: Vec<&str> = CitationStyle::ALL.iter().map(|s| s.label()).collect();
    console.log(format!("   {}", styles.join(", ")));

    console.log("\n💳 Payment methods");
    for method in PaymentMethod::ALL {
        console.log(format!(
            "   {:14} {} - {}",
            method.id(),
            method.label(),
            method.description()
        ));
    }

    Ok(())
}

/// " (+20%)" for a 1.2 multiplier, empty at 1.0
pub fn surcharge_note(multiplier: Decimal) -> String {
    if multiplier == dec!(1) {
        String::new()
    } else {
        format!(" (+{}%)", ((multiplier - dec!(1)) * dec!(100)).normalize())
    }
}

/// " (+30%)" from the urgency's whole-percent surcharge, empty at normal
pub fn urgency_note(urgency: Urgency) -> String {
    match urgency.surcharge_percent() {
        0 => String::new(),
        pct => format!(" (+{}%)", pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_build_matching_draft() {
        let args = QuoteArgs {
            service: ServiceKind::Master,
            pages: 20,
            urgency: Urgency::Urgent,
            language: Language::English,
            add_ons: vec![AddOn::Plagiarism],
        };

        let draft = args.to_draft().unwrap();
        let quote = pricing::quote(&draft);
        assert_eq!(quote.total, dec!(1515));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let args = QuoteArgs {
            service: ServiceKind::Seminar,
            pages: 0,
            urgency: Urgency::Normal,
            language: Language::Albanian,
            add_ons: vec![],
        };
        assert_eq!(args.to_draft(), Err(InputError::ZeroPages));
    }

    #[test]
    fn test_surcharge_notes() {
        assert_eq!(surcharge_note(dec!(1)), "");
        assert_eq!(surcharge_note(dec!(1.2)), " (+20%)");
        assert_eq!(surcharge_note(dec!(1.6)), " (+60%)");
    }

    #[test]
    fn test_urgency_notes_match_multipliers() {
        assert_eq!(urgency_note(Urgency::Normal), "");
        for urgency in Urgency::ALL {
            assert_eq!(urgency_note(urgency), surcharge_note(urgency.multiplier()));
        }
    }
}
