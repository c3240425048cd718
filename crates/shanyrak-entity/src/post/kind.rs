//! Listing type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a listing offers the property for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Offered for rent.
    Rent,
    /// Offered for sale.
    Buy,
}

impl PostType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Buy => "buy",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostType {
    type Err = shanyrak_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rent" => Ok(Self::Rent),
            "buy" => Ok(Self::Buy),
            _ => Err(shanyrak_core::AppError::validation(format!(
                "Invalid listing type: '{s}'. Expected one of: rent, buy"
            ))),
        }
    }
}
