//! Human-readable duration value used by every wait, timeout and interval
//! field in the configuration tree.
//!
//! The canonical text form lays the span out as hours, minutes and seconds
//! (`"24h0m0s"`, `"1m40s"`, `"20s"`) with sub-second remainders written as
//! extra `ms`/`us`/`ns` terms (`"200ms"`, `"1s500ms"`), so it never contains
//! fractions and always parses back to the same value.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Signed time span with nanosecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { nanos: 0 };
    pub const MAX: Duration = Duration { nanos: i64::MAX };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self::from_nanos(millis * NANOS_PER_MILLI)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self::from_nanos(secs * NANOS_PER_SEC)
    }

    /// `None` when the span does not fit in signed 64-bit nanoseconds
    pub const fn checked_from_secs(secs: i64) -> Option<Self> {
        match secs.checked_mul(NANOS_PER_SEC) {
            Some(nanos) => Some(Self::from_nanos(nanos)),
            None => None,
        }
    }

    pub const fn from_mins(mins: i64) -> Self {
        Self::from_secs(mins * 60)
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self::from_secs(hours * 3600)
    }

    pub const fn as_nanos(&self) -> i64 {
        self.nanos
    }

    /// Whole seconds, truncated toward zero
    pub const fn as_secs(&self) -> i64 {
        self.nanos / NANOS_PER_SEC
    }

    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    pub const fn is_positive(&self) -> bool {
        self.nanos > 0
    }

    /// Convert to a `std::time::Duration`; `None` for negative spans
    pub fn to_std(&self) -> Option<std::time::Duration> {
        u64::try_from(self.nanos)
            .ok()
            .map(std::time::Duration::from_nanos)
    }

    /// Parse the textual span grammar, e.g. `"20s"`, `"24h0m0s"`, `"-1m30s"`
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::malformed_duration(text, "empty duration"));
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        // A bare zero is the only unitless span
        if body == "0" {
            return Ok(Self::ZERO);
        }

        // humantime spells microseconds "us"
        let normalized = body.replace(['µ', 'μ'], "u");
        check_unit_terms(&normalized)
            .map_err(|reason| ConfigError::malformed_duration(text, reason))?;

        let span = humantime::parse_duration(&normalized)
            .map_err(|e| ConfigError::malformed_duration(text, e.to_string()))?;
        let nanos = i64::try_from(span.as_nanos()).map_err(|_| {
            ConfigError::malformed_duration(text, "span exceeds the representable range")
        })?;

        Ok(Self::from_nanos(if negative { -nanos } else { nanos }))
    }
}

/// Units accepted in a span. Calendar units such as `days` or `month` are not.
const SPAN_UNITS: &[&str] = &["ns", "us", "ms", "s", "m", "h"];

/// Every term must be digits followed by one of [`SPAN_UNITS`]
fn check_unit_terms(body: &str) -> Result<(), String> {
    let mut rest = body;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number at '{}'", rest));
        }
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        if unit.is_empty() {
            return Err("missing unit".to_string());
        }
        if !SPAN_UNITS.contains(&unit) {
            return Err(format!("unknown unit '{}'", unit));
        }
        rest = &rest[unit_len..];
    }
    Ok(())
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = ConfigError;

    fn try_from(span: std::time::Duration) -> ConfigResult<Self> {
        i64::try_from(span.as_nanos())
            .map(Self::from_nanos)
            .map_err(|_| {
                ConfigError::malformed_duration(
                    &format!("{:?}", span),
                    "span exceeds the representable range",
                )
            })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return f.write_str("0s");
        }
        if self.nanos < 0 {
            f.write_str("-")?;
        }

        let total = self.nanos.unsigned_abs();
        let secs = total / NANOS_PER_SEC as u64;
        let sub = total % NANOS_PER_SEC as u64;

        if secs > 0 {
            let hours = secs / 3600;
            let mins = (secs % 3600) / 60;
            if hours > 0 {
                write!(f, "{}h", hours)?;
            }
            if hours > 0 || mins > 0 {
                write!(f, "{}m", mins)?;
            }
            write!(f, "{}s", secs % 60)?;
        }

        let millis = sub / NANOS_PER_MILLI as u64;
        let micros = (sub / NANOS_PER_MICRO as u64) % 1000;
        let nanos = sub % NANOS_PER_MICRO as u64;
        if millis > 0 {
            write!(f, "{}ms", millis)?;
        }
        if micros > 0 {
            write!(f, "{}us", micros)?;
        }
        if nanos > 0 {
            write!(f, "{}ns", nanos)?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DurationVisitor;

        impl<'de> Visitor<'de> for DurationVisitor {
            type Value = Duration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a duration string such as \"20s\" or \"24h0m0s\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Duration, E> {
                Duration::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}
