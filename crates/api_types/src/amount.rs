use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Error produced when a decimal amount string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("amounts use at most two decimals")]
    TooManyDecimals,
    #[error("amount too large")]
    Overflow,
}

/// Decimal money amount represented as **integer cents**.
///
/// The store serializes amounts as decimal strings (`"20.00"`), but older
/// payloads carry bare numbers; both deserialize. Serialization always
/// produces the two-decimal string form.
///
/// Transaction amounts are non-negative magnitudes (the direction lives in
/// the transaction kind); summary balances may be negative, so the type
/// itself is signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Converts a floating point magnitude, rounding to the nearest cent.
    ///
    /// Returns `None` when the value is not finite or does not fit in cents.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`. Rejects empty strings, more than two fractional digits, and
    /// anything that is not a plain decimal number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseAmountError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let mut parts = rest.splitn(2, ['.', ',']);
        let units_raw = parts.next().unwrap_or("");
        let frac_raw = parts.next().unwrap_or("");

        if units_raw.is_empty() && frac_raw.is_empty() {
            return Err(ParseAmountError::Invalid);
        }
        if frac_raw.len() > 2 {
            return Err(ParseAmountError::TooManyDecimals);
        }
        if !units_raw.chars().all(|c| c.is_ascii_digit())
            || !frac_raw.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseAmountError::Invalid);
        }

        let units: i64 = if units_raw.is_empty() {
            0
        } else {
            units_raw.parse().map_err(|_| ParseAmountError::Overflow)?
        };
        let frac: i64 = match frac_raw.len() {
            0 => 0,
            1 => frac_raw.parse::<i64>().map_err(|_| ParseAmountError::Invalid)? * 10,
            _ => frac_raw.parse().map_err(|_| ParseAmountError::Invalid)?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or(ParseAmountError::Overflow)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Amount::from_f64(v).ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                v.checked_mul(100)
                    .map(Amount::new)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Amount::new)
                    .ok_or_else(|| E::custom("amount out of range"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::new(0).to_string(), "0.00");
        assert_eq!(Amount::new(1).to_string(), "0.01");
        assert_eq!(Amount::new(10).to_string(), "0.10");
        assert_eq!(Amount::new(1050).to_string(), "10.50");
        assert_eq!(Amount::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Amount>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Amount>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Amount>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Amount>().unwrap().cents(), 230);
        assert_eq!(".5".parse::<Amount>().unwrap().cents(), 50);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Amount>(), Err(ParseAmountError::Empty));
        assert_eq!("12.345".parse::<Amount>(), Err(ParseAmountError::TooManyDecimals));
        assert_eq!("12a".parse::<Amount>(), Err(ParseAmountError::Invalid));
        assert_eq!("1.2.3".parse::<Amount>(), Err(ParseAmountError::Invalid));
        assert_eq!(".".parse::<Amount>(), Err(ParseAmountError::Invalid));
    }

    #[test]
    fn deserializes_strings_and_numbers_alike() {
        assert_eq!(serde_json::from_str::<Amount>("\"15\"").unwrap().cents(), 1500);
        assert_eq!(serde_json::from_str::<Amount>("\"15.5\"").unwrap().cents(), 1550);
        assert_eq!(serde_json::from_str::<Amount>("\"15.50\"").unwrap().cents(), 1550);
        assert_eq!(serde_json::from_str::<Amount>("15.5").unwrap().cents(), 1550);
        assert_eq!(serde_json::from_str::<Amount>("15").unwrap().cents(), 1500);
    }

    #[test]
    fn serializes_as_two_decimal_string() {
        assert_eq!(serde_json::to_string(&Amount::new(1550)).unwrap(), "\"15.50\"");
        assert_eq!(serde_json::to_string(&Amount::new(-20)).unwrap(), "\"-0.20\"");
    }
}
