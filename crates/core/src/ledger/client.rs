//! Clients and their names.

use serde::{Deserialize, Serialize};
use tally_shared::types::ClientId;

use super::error::LedgerError;

/// A validated client name: one or more ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Validates and wraps a name.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidName` if the name is empty or contains
    /// anything other than `A-Z` / `a-z`.
    pub fn parse(name: impl Into<String>) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::InvalidName);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ClientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Client name.
    pub name: ClientName,
}

impl Client {
    /// Creates a client with a fresh ID.
    #[must_use]
    pub fn new(name: ClientName) -> Self {
        Self {
            id: ClientId::new(),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alvaro")]
    #[case("x")]
    #[case("ZZtop")]
    fn test_accepts_letters(#[case] name: &str) {
        assert_eq!(ClientName::parse(name).unwrap().as_str(), name);
    }

    #[rstest]
    #[case("513465")]
    #[case("")]
    #[case("Ana Maria")]
    #[case("José")]
    #[case("bob1")]
    fn test_rejects_non_letters(#[case] name: &str) {
        assert!(matches!(
            ClientName::parse(name),
            Err(LedgerError::InvalidName)
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ClientName = serde_json::from_str("\"Alvaro\"").unwrap();
        assert_eq!(ok.to_string(), "Alvaro");
        assert!(serde_json::from_str::<ClientName>("\"513465\"").is_err());
    }
}
