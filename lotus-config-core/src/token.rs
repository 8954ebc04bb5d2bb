//! FIL token amounts
//!
//! Amounts are held as unsigned attoFIL counts (1 FIL = 10^18 attoFIL) in a
//! `u128`, which comfortably covers the total token supply and any fee cap
//! multiplied by a realistic batch size. The text form is a decimal FIL
//! value with an optional unit suffix, e.g. `"0.07 FIL"` or `"320 pFIL"`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// Number of attoFIL in one FIL
pub const ATTO_PER_FIL: u128 = 1_000_000_000_000_000_000;

const FIL_DECIMALS: u32 = 18;

/// Non-negative amount of FIL in attoFIL units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub const fn from_atto(atto: u128) -> Self {
        Self(atto)
    }

    pub const fn from_pico_fil(pico: u128) -> Self {
        Self(pico * 1_000_000)
    }

    pub const fn from_nano_fil(nano: u128) -> Self {
        Self(nano * 1_000_000_000)
    }

    pub const fn from_milli_fil(milli: u128) -> Self {
        Self(milli * 1_000_000_000_000_000)
    }

    pub const fn from_whole_fil(fil: u128) -> Self {
        Self(fil * ATTO_PER_FIL)
    }

    pub const fn atto(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: TokenAmount) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a unit count, e.g. a number of sectors
    pub const fn saturating_mul(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count as u128))
    }

    /// Parse a decimal FIL amount with an optional unit suffix
    ///
    /// Accepted suffixes (case-insensitive): `FIL`, `mFIL`/`milliFIL`,
    /// `uFIL`/`microFIL`, `nFIL`/`nanoFIL`, `pFIL`/`picoFIL`,
    /// `fFIL`/`femtoFIL`, `aFIL`/`attoFIL`. A bare number is read as FIL.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::malformed_token_amount(text, "empty amount"));
        }

        let unit_start = trimmed
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(unit_start);
        let number = number.trim();

        let decimals = unit_decimals(unit.trim())
            .ok_or_else(|| {
                ConfigError::malformed_token_amount(text, format!("unknown unit '{}'", unit.trim()))
            })?;

        if number.starts_with('-') {
            return Err(ConfigError::malformed_token_amount(text, "amount must not be negative"));
        }

        let (whole, frac) = match number.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (number, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(ConfigError::malformed_token_amount(text, "missing digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::malformed_token_amount(text, "expected a decimal number"));
        }
        if frac.len() > decimals as usize {
            return Err(ConfigError::malformed_token_amount(
                text,
                format!("more than {} decimal places for this unit", decimals),
            ));
        }

        let overflow = || ConfigError::malformed_token_amount(text, "amount is too large");

        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_value: u128 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| overflow())?
        };

        let scale = 10u128.pow(decimals);
        let frac_scale = 10u128.pow(decimals - frac.len() as u32);

        whole_value
            .checked_mul(scale)
            .and_then(|w| frac_value.checked_mul(frac_scale).and_then(|f| w.checked_add(f)))
            .map(Self)
            .ok_or_else(overflow)
    }
}

/// Number of fractional decimal digits a unit carries relative to attoFIL
fn unit_decimals(unit: &str) -> Option<u32> {
    match unit.to_ascii_lowercase().as_str() {
        "" | "fil" => Some(FIL_DECIMALS),
        "mfil" | "millifil" => Some(15),
        "ufil" | "microfil" => Some(12),
        "nfil" | "nanofil" => Some(9),
        "pfil" | "picofil" => Some(6),
        "ffil" | "femtofil" => Some(3),
        "afil" | "attofil" => Some(0),
        _ => None,
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / ATTO_PER_FIL;
        let frac = self.0 % ATTO_PER_FIL;
        if frac == 0 {
            return write!(f, "{} FIL", whole);
        }
        let digits = format!("{:018}", frac);
        write!(f, "{}.{} FIL", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for TokenAmount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenAmountVisitor;

        impl<'de> Visitor<'de> for TokenAmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a FIL amount such as \"0.07 FIL\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<TokenAmount, E> {
                TokenAmount::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TokenAmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_fil() {
        assert_eq!(TokenAmount::parse("0.07").unwrap(), TokenAmount::from_milli_fil(70));
        assert_eq!(TokenAmount::parse("0.025 FIL").unwrap(), TokenAmount::from_milli_fil(25));
        assert_eq!(TokenAmount::parse("5").unwrap(), TokenAmount::from_whole_fil(5));
        assert_eq!(TokenAmount::parse("0").unwrap(), TokenAmount::ZERO);
        assert_eq!(TokenAmount::parse(".5fil").unwrap(), TokenAmount::from_milli_fil(500));
    }

    #[test]
    fn test_parse_unit_suffixes() {
        assert_eq!(TokenAmount::parse("320 pFIL").unwrap(), TokenAmount::from_pico_fil(320));
        assert_eq!(TokenAmount::parse("1 nanoFIL").unwrap(), TokenAmount::from_nano_fil(1));
        assert_eq!(TokenAmount::parse("7 attofil").unwrap(), TokenAmount::from_atto(7));
        assert_eq!(TokenAmount::parse("1.5 fFIL").unwrap(), TokenAmount::from_atto(1500));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "abc",
            "-1",
            "1.2.3",
            "0.1 dogecoin",
            "1.5 aFIL",
            "0.0000000000000000001",
        ] {
            assert!(
                matches!(TokenAmount::parse(input), Err(ConfigError::MalformedTokenAmount { .. })),
                "expected MalformedTokenAmount for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let huge = format!("{}", u128::MAX);
        assert!(TokenAmount::parse(&huge).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenAmount::from_milli_fil(70).to_string(), "0.07 FIL");
        assert_eq!(TokenAmount::from_whole_fil(5).to_string(), "5 FIL");
        assert_eq!(TokenAmount::ZERO.to_string(), "0 FIL");
        assert_eq!(TokenAmount::from_pico_fil(320).to_string(), "0.00000000032 FIL");
    }

    #[test]
    fn test_saturating_arithmetic() {
        let max = TokenAmount::from_atto(u128::MAX);
        assert_eq!(max.saturating_add(TokenAmount::from_atto(1)), max);
        assert_eq!(max.saturating_mul(2), max);
        assert_eq!(
            TokenAmount::from_milli_fil(20).saturating_mul(6),
            TokenAmount::from_milli_fil(120)
        );
    }
}
