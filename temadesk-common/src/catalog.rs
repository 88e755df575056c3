//! Service Catalog
//!
//! Fixed catalogs the booking wizard offers: service kinds with base prices,
//! delivery languages and urgency levels with their price multipliers, flat-fee
//! add-ons, citation styles, and the manual payment channels. Prices are in
//! whole euro; multipliers carry at most two decimal places.

use crate::error::InputError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page count the catalog base prices are quoted for.
pub const REFERENCE_PAGE_COUNT: u32 = 10;

/// Kind of academic work that can be ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    Bachelor,
    Master,
    Seminar,
    Coursework,
    Research,
    Presentation,
    Spss,
    Editing,
    Translation,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 9] = [
        ServiceKind::Bachelor,
        ServiceKind::Master,
        ServiceKind::Seminar,
        ServiceKind::Coursework,
        ServiceKind::Research,
        ServiceKind::Presentation,
        ServiceKind::Spss,
        ServiceKind::Editing,
        ServiceKind::Translation,
    ];

    /// Stable identifier, also used as the deep-link parameter value
    pub fn id(self) -> &'static str {
        match self {
            ServiceKind::Bachelor => "bachelor",
            ServiceKind::Master => "master",
            ServiceKind::Seminar => "seminar",
            ServiceKind::Coursework => "coursework",
            ServiceKind::Research => "research",
            ServiceKind::Presentation => "presentation",
            ServiceKind::Spss => "spss",
            ServiceKind::Editing => "editing",
            ServiceKind::Translation => "translation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::Bachelor => "Bachelor Thesis",
            ServiceKind::Master => "Master Thesis",
            ServiceKind::Seminar => "Seminar Paper",
            ServiceKind::Coursework => "Coursework Assignment",
            ServiceKind::Research => "Research Project",
            ServiceKind::Presentation => "PowerPoint Presentation",
            ServiceKind::Spss => "SPSS / Excel Analysis",
            ServiceKind::Editing => "Editing & Formatting",
            ServiceKind::Translation => "Translation",
        }
    }

    /// Base price in euro for [`REFERENCE_PAGE_COUNT`] pages
    pub fn base_price(self) -> Decimal {
        match self {
            ServiceKind::Bachelor => dec!(300),
            ServiceKind::Master => dec!(500),
            ServiceKind::Seminar => dec!(80),
            ServiceKind::Coursework => dec!(50),
            ServiceKind::Research => dec!(250),
            ServiceKind::Presentation => dec!(40),
            ServiceKind::Spss => dec!(100),
            ServiceKind::Editing => dec!(30),
            ServiceKind::Translation => dec!(25),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }
}

impl FromStr for ServiceKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| InputError::UnknownId {
            what: "service",
            id: s.to_string(),
        })
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery language with its price multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Albanian,
    English,
    Italian,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Albanian, Language::English, Language::Italian];

    pub fn id(self) -> &'static str {
        match self {
            Language::Albanian => "albanian",
            Language::English => "english",
            Language::Italian => "italian",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Albanian => "Albanian",
            Language::English => "English",
            Language::Italian => "Italian",
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            Language::Albanian => dec!(1),
            Language::English => dec!(1.2),
            Language::Italian => dec!(1.15),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.id() == id)
    }
}

impl FromStr for Language {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| InputError::UnknownId {
            what: "language",
            id: s.to_string(),
        })
    }
}

/// Requested turnaround speed with its price multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Normal,
    Urgent,
    VeryUrgent,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Normal, Urgency::Urgent, Urgency::VeryUrgent];

    pub fn id(self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::VeryUrgent => "very-urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Normal => "Normal (7+ days)",
            Urgency::Urgent => "Urgent (3-6 days)",
            Urgency::VeryUrgent => "Very Urgent (1-2 days)",
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            Urgency::Normal => dec!(1),
            Urgency::Urgent => dec!(1.3),
            Urgency::VeryUrgent => dec!(1.6),
        }
    }

    /// Surcharge over the base price, in whole percent, for display
    pub fn surcharge_percent(self) -> u32 {
        match self {
            Urgency::Normal => 0,
            Urgency::Urgent => 30,
            Urgency::VeryUrgent => 60,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.id() == id)
    }
}

impl FromStr for Urgency {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| InputError::UnknownId {
            what: "urgency",
            id: s.to_string(),
        })
    }
}

/// Optional flat-fee service supplement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddOn {
    Powerpoint,
    SpssAddon,
    Plagiarism,
    Express,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [
        AddOn::Powerpoint,
        AddOn::SpssAddon,
        AddOn::Plagiarism,
        AddOn::Express,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AddOn::Powerpoint => "powerpoint",
            AddOn::SpssAddon => "spss-addon",
            AddOn::Plagiarism => "plagiarism",
            AddOn::Express => "express",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AddOn::Powerpoint => "PowerPoint Slides",
            AddOn::SpssAddon => "SPSS Analysis Add-on",
            AddOn::Plagiarism => "Plagiarism Report",
            AddOn::Express => "Express Delivery",
        }
    }

    /// Flat price in euro, never scaled by page count
    pub fn price(self) -> Decimal {
        match self {
            AddOn::Powerpoint => dec!(30),
            AddOn::SpssAddon => dec!(50),
            AddOn::Plagiarism => dec!(15),
            AddOn::Express => dec!(40),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.id() == id)
    }
}

impl FromStr for AddOn {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| InputError::UnknownId {
            what: "add-on",
            id: s.to_string(),
        })
    }
}

/// Academic level of the requested work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcademicLevel {
    Bachelor,
    Master,
    PhD,
}

impl AcademicLevel {
    pub const ALL: [AcademicLevel; 3] = [
        AcademicLevel::Bachelor,
        AcademicLevel::Master,
        AcademicLevel::PhD,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AcademicLevel::Bachelor => "Bachelor",
            AcademicLevel::Master => "Master",
            AcademicLevel::PhD => "PhD",
        }
    }
}

/// Citation style requested for the work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationStyle {
    #[serde(rename = "APA 7")]
    Apa7,
    #[serde(rename = "MLA")]
    Mla,
    Harvard,
    Chicago,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 4] = [
        CitationStyle::Apa7,
        CitationStyle::Mla,
        CitationStyle::Harvard,
        CitationStyle::Chicago,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CitationStyle::Apa7 => "APA 7",
            CitationStyle::Mla => "MLA",
            CitationStyle::Harvard => "Harvard",
            CitationStyle::Chicago => "Chicago",
        }
    }
}

/// Manual payment channel; actual payment happens off-platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Moneygram,
    WesternUnion,
    Ria,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Moneygram,
        PaymentMethod::WesternUnion,
        PaymentMethod::Ria,
        PaymentMethod::BankTransfer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::Moneygram => "moneygram",
            PaymentMethod::WesternUnion => "western-union",
            PaymentMethod::Ria => "ria",
            PaymentMethod::BankTransfer => "bank-transfer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Moneygram => "MoneyGram",
            PaymentMethod::WesternUnion => "Western Union",
            PaymentMethod::Ria => "RIA Money Transfer",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PaymentMethod::Moneygram => "Send payment via MoneyGram",
            PaymentMethod::WesternUnion => "Send payment via Western Union",
            PaymentMethod::Ria => "Send payment via RIA",
            PaymentMethod::BankTransfer => "Direct bank account transfer",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.id() == id)
    }
}

impl FromStr for PaymentMethod {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| InputError::UnknownId {
            what: "payment method",
            id: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_ids_round_trip() {
        for service in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_id(service.id()), Some(service));
        }
        assert_eq!(ServiceKind::from_id("phd-thesis"), None);
    }

    #[test]
    fn test_base_prices() {
        assert_eq!(ServiceKind::Bachelor.base_price(), dec!(300));
        assert_eq!(ServiceKind::Master.base_price(), dec!(500));
        assert_eq!(ServiceKind::Translation.base_price(), dec!(25));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(Language::Albanian.multiplier(), dec!(1));
        assert_eq!(Language::English.multiplier(), dec!(1.2));
        assert_eq!(Urgency::VeryUrgent.multiplier(), dec!(1.6));
        assert_eq!(Urgency::Urgent.surcharge_percent(), 30);
    }

    #[test]
    fn test_kebab_case_serialization() {
        let json = serde_json::to_string(&Urgency::VeryUrgent).unwrap();
        assert_eq!(json, "\"very-urgent\"");
        let json = serde_json::to_string(&PaymentMethod::WesternUnion).unwrap();
        assert_eq!(json, "\"western-union\"");
        let parsed: AddOn = serde_json::from_str("\"spss-addon\"").unwrap();
        assert_eq!(parsed, AddOn::SpssAddon);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "overnight".parse::<Urgency>().unwrap_err();
        assert!(err.to_string().contains("overnight"));
    }
}
