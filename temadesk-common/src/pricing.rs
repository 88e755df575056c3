//! Pricing Calculator
//!
//! Pure function from an order draft to a price breakdown. The quote is always
//! recomputed from the current draft; it is never cached or mutated on its own,
//! so it cannot go stale.
//!
//! Base prices are quoted for 10 pages and scale linearly with the page count.
//! Urgency and language are surcharges over the scaled base; add-ons are flat
//! and independent of the page count.

use crate::catalog::REFERENCE_PAGE_COUNT;
use crate::order::OrderDraft;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Price breakdown in whole euro
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub base: Decimal,
    pub urgency_fee: Decimal,
    pub language_fee: Decimal,
    pub add_ons_fee: Decimal,
    pub total: Decimal,
}

impl Quote {
    pub const ZERO: Quote = Quote {
        base: Decimal::ZERO,
        urgency_fee: Decimal::ZERO,
        language_fee: Decimal::ZERO,
        add_ons_fee: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

/// Compute the quote for the current draft state.
///
/// An unset service contributes a base of 0, so the total collapses to the
/// add-ons fee. The draft is not mutated and repeated calls yield identical
/// breakdowns.
pub fn quote(draft: &OrderDraft) -> Quote {
    let Some(service) = draft.service else {
        let add_ons_fee = round_eur(add_ons_total(draft));
        return Quote {
            add_ons_fee,
            total: add_ons_fee,
            ..Quote::ZERO
        };
    };

    let base = service.base_price() * Decimal::from(draft.pages)
        / Decimal::from(REFERENCE_PAGE_COUNT);
    let urgency_fee = base * (draft.urgency.multiplier() - Decimal::ONE);
    let language_fee = base * (draft.language.multiplier() - Decimal::ONE);
    let add_ons_fee = add_ons_total(draft);
    let total = base + urgency_fee + language_fee + add_ons_fee;

    Quote {
        base: round_eur(base),
        urgency_fee: round_eur(urgency_fee),
        language_fee: round_eur(language_fee),
        add_ons_fee: round_eur(add_ons_fee),
        total: round_eur(total),
    }
}

fn add_ons_total(draft: &OrderDraft) -> Decimal {
    draft.add_ons.iter().map(|a| a.price()).sum()
}

/// Round to the nearest whole euro, half away from zero.
fn round_eur(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AddOn, Language, ServiceKind, Urgency};
    use rust_decimal_macros::dec;

    fn draft(service: ServiceKind, pages: u32) -> OrderDraft {
        let mut d = OrderDraft::default();
        d.service = Some(service);
        d.pages = pages;
        d
    }

    #[test]
    fn test_reference_order_costs_base_price() {
        // bachelor, 10 pages, normal, albanian, no add-ons
        let q = quote(&draft(ServiceKind::Bachelor, 10));
        assert_eq!(q.base, dec!(300));
        assert_eq!(q.urgency_fee, dec!(0));
        assert_eq!(q.language_fee, dec!(0));
        assert_eq!(q.add_ons_fee, dec!(0));
        assert_eq!(q.total, dec!(300));
    }

    #[test]
    fn test_full_surcharge_breakdown() {
        // master, 20 pages, urgent, english, plagiarism report
        let mut d = draft(ServiceKind::Master, 20);
        d.urgency = Urgency::Urgent;
        d.language = Language::English;
        d.add_ons.push(AddOn::Plagiarism);

        let q = quote(&d);
        assert_eq!(q.base, dec!(1000));
        assert_eq!(q.urgency_fee, dec!(300));
        assert_eq!(q.language_fee, dec!(200));
        assert_eq!(q.add_ons_fee, dec!(15));
        assert_eq!(q.total, dec!(1515));
    }

    #[test]
    fn test_unset_service_yields_add_ons_only() {
        let mut d = OrderDraft::default();
        d.add_ons.push(AddOn::Express);
        d.add_ons.push(AddOn::Plagiarism);

        let q = quote(&d);
        assert_eq!(q.base, dec!(0));
        assert_eq!(q.total, dec!(55));
        // both paths round every component to whole euro
        assert_eq!(q.add_ons_fee, round_eur(q.add_ons_fee));
        assert_eq!(q.total, round_eur(q.total));
    }

    #[test]
    fn test_base_scales_linearly_with_pages() {
        for pages in [1u32, 3, 7, 25] {
            let single = quote(&draft(ServiceKind::Research, pages));
            let double = quote(&draft(ServiceKind::Research, pages * 2));
            assert_eq!(double.base, single.base * dec!(2));
        }
    }

    #[test]
    fn test_zero_pages_collapses_to_add_ons() {
        let mut d = draft(ServiceKind::Bachelor, 0);
        d.add_ons.push(AddOn::Powerpoint);

        let q = quote(&d);
        assert_eq!(q.base, dec!(0));
        assert_eq!(q.total, dec!(30));
    }

    #[test]
    fn test_add_on_increases_total_by_flat_price() {
        for pages in [5u32, 10, 40] {
            let mut with = draft(ServiceKind::Seminar, pages);
            let without = quote(&with);
            with.add_ons.push(AddOn::SpssAddon);
            let q = quote(&with);
            assert_eq!(q.total, without.total + AddOn::SpssAddon.price());
        }
    }

    #[test]
    fn test_quote_is_pure_and_idempotent() {
        let mut d = draft(ServiceKind::Spss, 13);
        d.urgency = Urgency::VeryUrgent;
        d.language = Language::Italian;
        d.add_ons.push(AddOn::Express);

        let before = d.clone();
        let first = quote(&d);
        let second = quote(&d);
        assert_eq!(first, second);
        assert_eq!(d, before);
    }

    #[test]
    fn test_fractional_fees_round_half_away_from_zero() {
        // seminar at 7 pages: base 56, italian fee 8.4 -> 8
        let mut d = draft(ServiceKind::Seminar, 7);
        d.language = Language::Italian;

        let q = quote(&d);
        assert_eq!(q.base, dec!(56));
        assert_eq!(q.language_fee, dec!(8));
        // total is rounded from the unrounded components: 64.4 -> 64
        assert_eq!(q.total, dec!(64));
    }
}
