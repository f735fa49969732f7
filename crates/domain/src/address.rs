//! Network address identifying a traffic light.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Host (IP or hostname) a traffic light listens on.
///
/// The address is the light's identity: it is unique in the registry and
/// never changes for the lifetime of a light. It is interpolated into the
/// device URL ahead of the device port, so whitespace, path separators and
/// `:` (ports, IPv6 literals) are rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate an address, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAddress`] for blank input and
    /// [`ValidationError::InvalidAddress`] when the value contains
    /// whitespace, `/` or `:`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
            return Err(ValidationError::InvalidAddress(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_trim_surrounding_whitespace() {
        let addr = Address::parse("  192.168.1.20 ").unwrap();
        assert_eq!(addr.as_str(), "192.168.1.20");
    }

    #[test]
    fn should_reject_empty_address() {
        assert_eq!(Address::parse("   "), Err(ValidationError::EmptyAddress));
    }

    #[test]
    fn should_reject_address_with_path_separator() {
        assert!(matches!(
            Address::parse("10.0.0.1/admin"),
            Err(ValidationError::InvalidAddress(_))
        ));
    }

    #[test]
    fn should_reject_address_with_port_or_ipv6_literal() {
        for value in ["10.0.0.1:8080", "fe80::1"] {
            assert!(matches!(
                Address::parse(value),
                Err(ValidationError::InvalidAddress(_))
            ));
        }
    }

    #[test]
    fn should_reject_address_with_inner_whitespace() {
        assert!(matches!(
            Address::parse("10.0.0 .1"),
            Err(ValidationError::InvalidAddress(_))
        ));
    }

    #[test]
    fn should_order_lexicographically() {
        let a = Address::parse("10.0.0.1").unwrap();
        let b = Address::parse("10.0.0.2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let addr = Address::parse("light-1.local").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"light-1.local\"");
    }

    #[test]
    fn should_reject_invalid_address_when_deserializing() {
        let result: Result<Address, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
