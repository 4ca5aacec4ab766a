use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::range::SessionProfile;

/// Broad asset-class grouping that decides which source handle serves a
/// market and which session profile its estimates use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketClass {
    /// Futures-style venues trading multiple sessions per day.
    FutureLike,
    /// Cash markets with regular exchange hours.
    CashLike,
}

impl MarketClass {
    pub fn session_profile(self) -> SessionProfile {
        match self {
            MarketClass::FutureLike => SessionProfile::Extended,
            MarketClass::CashLike => SessionProfile::Standard,
        }
    }
}

/// Lookup from a venue mnemonic to its market class. Numeric wire codes stay
/// with the source adapter; this table only answers "which kind of market".
#[derive(Clone, Debug)]
pub struct MarketClassifier {
    classes: HashMap<String, MarketClass>,
}

const FUTURE_VENUES: &[&str] = &["DCE", "SHFE", "CZCE", "CFFEX", "SGE", "HKSE"];
const CASH_VENUES: &[&str] = &["SSE", "SZSE", "BSE"];

impl MarketClassifier {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Classifier seeded with the venues the upstream source serves.
    pub fn with_defaults() -> Self {
        let mut classifier = Self::new();
        for venue in FUTURE_VENUES {
            classifier.insert(venue, MarketClass::FutureLike);
        }
        for venue in CASH_VENUES {
            classifier.insert(venue, MarketClass::CashLike);
        }
        classifier
    }

    pub fn insert(&mut self, market: &str, class: MarketClass) {
        self.classes.insert(market.to_uppercase(), class);
    }

    /// Resolve a market mnemonic (case-insensitive). Unknown markets are
    /// rejected before any fetch is attempted.
    pub fn classify(&self, market: &str) -> Result<MarketClass> {
        self.classes
            .get(&market.to_uppercase())
            .copied()
            .ok_or_else(|| AppError::InvalidMarket(market.to_string()))
    }
}

impl Default for MarketClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_known_venues() {
        let classifier = MarketClassifier::with_defaults();
        assert_eq!(classifier.classify("DCE").unwrap(), MarketClass::FutureLike);
        assert_eq!(classifier.classify("shfe").unwrap(), MarketClass::FutureLike);
        assert_eq!(classifier.classify("SSE").unwrap(), MarketClass::CashLike);
        assert_eq!(classifier.classify("bse").unwrap(), MarketClass::CashLike);
    }

    #[test]
    fn unknown_market_is_rejected() {
        let classifier = MarketClassifier::with_defaults();
        let err = classifier.classify("NYSE").unwrap_err();
        assert!(matches!(err, AppError::InvalidMarket(code) if code == "NYSE"));
    }

    #[test]
    fn callers_can_extend_the_table() {
        let mut classifier = MarketClassifier::with_defaults();
        classifier.insert("INE", MarketClass::FutureLike);
        assert_eq!(classifier.classify("ine").unwrap(), MarketClass::FutureLike);
    }

    #[test]
    fn class_picks_session_profile() {
        assert_eq!(
            MarketClass::FutureLike.session_profile(),
            SessionProfile::Extended
        );
        assert_eq!(
            MarketClass::CashLike.session_profile(),
            SessionProfile::Standard
        );
    }
}
