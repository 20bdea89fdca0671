//! Movement detail lines.
//!
//! A detail is a single dated-movement line: a positive amount tagged as an
//! entry (`ingreso`) or an egress (`egreso`). Categories form a closed set and
//! are validated when the detail is built, so totals never have to skip
//! unknown tags.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::MovementDetailId;

use super::error::LedgerError;

/// Category of a detail line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailKind {
    /// Money coming into the account.
    #[serde(rename = "ingreso")]
    Entry,
    /// Money leaving the account.
    #[serde(rename = "egreso")]
    Egress,
}

impl DetailKind {
    /// Wire tag for an entry line.
    pub const ENTRY_TAG: &'static str = "ingreso";
    /// Wire tag for an egress line.
    pub const EGRESS_TAG: &'static str = "egreso";

    /// Parses a wire tag.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidCategory` for anything other than the two
    /// known tags. Matching is exact.
    pub fn parse(tag: &str) -> Result<Self, LedgerError> {
        match tag {
            Self::ENTRY_TAG => Ok(Self::Entry),
            Self::EGRESS_TAG => Ok(Self::Egress),
            other => Err(LedgerError::InvalidCategory(other.to_string())),
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => Self::ENTRY_TAG,
            Self::Egress => Self::EGRESS_TAG,
        }
    }
}

impl std::fmt::Display for DetailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated detail as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailInput {
    /// Amount of the line.
    pub amount: Decimal,
    /// Raw category tag.
    #[serde(rename = "type")]
    pub kind: String,
}

impl DetailInput {
    /// Convenience constructor.
    #[must_use]
    pub fn new(amount: Decimal, kind: impl Into<String>) -> Self {
        Self {
            amount,
            kind: kind.into(),
        }
    }
}

/// A validated detail line belonging to a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDetail {
    /// Detail ID.
    pub id: MovementDetailId,
    /// Strictly positive amount.
    pub amount: Decimal,
    /// Entry or egress.
    #[serde(rename = "type")]
    pub kind: DetailKind,
}

impl MovementDetail {
    /// Builds a detail line, rejecting non-positive amounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn new(amount: Decimal, kind: DetailKind) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(Self {
            id: MovementDetailId::new(),
            amount,
            kind,
        })
    }

    /// Validates a raw input line. The category is checked before the amount.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` or `InvalidAmount`.
    pub fn from_input(input: &DetailInput) -> Result<Self, LedgerError> {
        let kind = DetailKind::parse(&input.kind)?;
        Self::new(input.amount, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(DetailKind::parse("ingreso").unwrap(), DetailKind::Entry);
        assert_eq!(DetailKind::parse("egreso").unwrap(), DetailKind::Egress);
    }

    #[test]
    fn test_parse_rejects_misspelled_tag() {
        for tag in ["ingres", "INGRESO", " egreso", "", "entry"] {
            let err = DetailKind::parse(tag).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidCategory(ref t) if t == tag));
        }
    }

    #[test]
    fn test_detail_rejects_non_positive_amount() {
        assert!(matches!(
            MovementDetail::new(Decimal::ZERO, DetailKind::Entry),
            Err(LedgerError::InvalidAmount)
        ));
        assert!(matches!(
            MovementDetail::new(dec!(-1), DetailKind::Egress),
            Err(LedgerError::InvalidAmount)
        ));
        assert!(MovementDetail::new(dec!(0.01), DetailKind::Egress).is_ok());
    }

    #[test]
    fn test_from_input_checks_category_first() {
        let input = DetailInput::new(dec!(-5), "ingres");
        assert!(matches!(
            MovementDetail::from_input(&input),
            Err(LedgerError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_wire_format() {
        let detail = MovementDetail::new(dec!(12.4), DetailKind::Entry).unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["type"], "ingreso");
        assert_eq!(json["amount"], "12.4");

        let input: DetailInput =
            serde_json::from_str(r#"{"amount": 2.7, "type": "egreso"}"#).unwrap();
        assert_eq!(input, DetailInput::new(dec!(2.7), "egreso"));
    }
}
