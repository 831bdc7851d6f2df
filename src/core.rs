//! Core types shared by every stage of the billing pipeline.

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Customers are identified by a unique integer id, used as the join key between datasets.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Currencies accepted on a purchase. Serialized with their display name, e.g: `"dollars"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Currency {
    #[serde(rename = "euro")]
    Euro,
    #[serde(rename = "dollars")]
    Dollars,
}

impl Currency {
    /// The human readable name sent to the billing endpoint.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Euro => "euro",
            Self::Dollars => "dollars",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = ParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "EUR" => Ok(Self::Euro),
            "USD" => Ok(Self::Dollars),
            _ => Err(ParseError::UnknownCurrency(code.to_string())),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a customer is addressed on their bill, resolved from the title code of the dataset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Salutation {
    Female,
    Male,
}

impl std::str::FromStr for Salutation {
    type Err = ParseError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "1" => Ok(Self::Female),
            "2" => Ok(Self::Male),
            _ => Err(ParseError::UnknownTitle(code.to_string())),
        }
    }
}

impl std::fmt::Display for Salutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Female => f.write_str("Female"),
            Self::Male => f.write_str("Male"),
        }
    }
}
