use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub price: Price,
}

/// A service together with the name of the user who offers it.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceListing {
    pub service: Service,
    pub owner_fullname: String,
}

/// Non-negative, finite service price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price is empty")]
    Empty,
    #[error("price is not a number: {0}")]
    NotANumber(String),
    #[error("price must not be negative")]
    Negative,
}

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber(value.to_string()));
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        // abs() folds -0.0 into 0.0
        Ok(Price(value.abs()))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    // Accepts a decimal comma as well, the usual separator in the Greek locale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let normalized = trimmed.replace(',', ".");
        let is_plain_decimal = normalized
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
        if !is_plain_decimal {
            return Err(PriceError::NotANumber(trimmed.to_string()));
        }
        let value: f64 = normalized
            .parse()
            .map_err(|_| PriceError::NotANumber(trimmed.to_string()))?;
        Price::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_comma_decimals() {
        assert_eq!("25".parse::<Price>().unwrap().value(), 25.0);
        assert_eq!(" 12.50 ".parse::<Price>().unwrap().value(), 12.5);
        assert_eq!("7,25".parse::<Price>().unwrap().value(), 7.25);
        assert_eq!("0".parse::<Price>().unwrap().value(), 0.0);
    }

    #[test]
    fn rejects_invalid_prices() {
        assert_eq!("".parse::<Price>(), Err(PriceError::Empty));
        assert_eq!("-3".parse::<Price>(), Err(PriceError::Negative));
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::NotANumber(_))));
        assert!(matches!("inf".parse::<Price>(), Err(PriceError::NotANumber(_))));
        assert!(matches!("NaN".parse::<Price>(), Err(PriceError::NotANumber(_))));
        assert!(matches!("1e400".parse::<Price>(), Err(PriceError::NotANumber(_))));
        assert!(matches!("1.2.3".parse::<Price>(), Err(PriceError::NotANumber(_))));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Price::new(9.5).unwrap().to_string(), "9.50");
    }
}
