//! Fixed-point percentages
//!
//! Probabilities are entered as decimal percentages ("15", "2.5", "0.125%") and
//! must be summed and rounded without binary floating-point drift. A
//! [`Percentage`] stores the value in atto-percent units (1 unit = 10⁻¹⁸ %),
//! so every numeral with up to eighteen fraction digits is represented exactly.
//!
//! Longer numerals keep their first eighteen fraction digits plus a sticky
//! `inexact` flag: the true value then lies strictly between the stored units
//! and the next unit up. Comparisons and rounding honor that.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PercentError, PercentResult};

/// Atto-percent units per whole percent
pub const ATTOS_PER_PERCENT: u128 = 1_000_000_000_000_000_000;

/// Atto-percent units per basis point
pub const ATTOS_PER_BASIS_POINT: u128 = ATTOS_PER_PERCENT / 100;

/// Atto-percent units per micro-percent
const ATTOS_PER_MICRO: u128 = ATTOS_PER_PERCENT / 1_000_000;

/// Fraction digits stored exactly
const FRACTION_DIGITS: usize = 18;

/// An exact, non-negative percentage
///
/// Ordering treats an inexact value as just above its stored units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage {
    attos: u128,
    /// Non-zero digits were dropped past the eighteenth fraction digit
    inexact: bool,
}

impl Percentage {
    /// 0%
    pub const ZERO: Self = Self::from_attos(0);

    /// 100%
    pub const HUNDRED: Self = Self::from_attos(100 * ATTOS_PER_PERCENT);

    /// Accepted distance from 100% when validating a table (0.01%)
    pub const SUM_TOLERANCE: Self = Self::from_attos(ATTOS_PER_PERCENT / 100);

    const fn from_attos(attos: u128) -> Self {
        Self {
            attos,
            inexact: false,
        }
    }

    /// Build from micro-percent units (10⁻⁶ %)
    pub const fn from_micros(micros: u64) -> Self {
        Self::from_attos(micros as u128 * ATTOS_PER_MICRO)
    }

    /// Build from a whole number of percent
    pub const fn from_whole(percent: u64) -> Self {
        Self::from_attos(percent as u128 * ATTOS_PER_PERCENT)
    }

    /// Micro-percent units, truncated
    pub fn micros(self) -> u64 {
        u64::try_from(self.attos / ATTOS_PER_MICRO).unwrap_or(u64::MAX)
    }

    /// True if digits past the eighteenth were dropped
    pub const fn is_inexact(self) -> bool {
        self.inexact
    }

    /// Strictly greater than zero
    pub const fn is_positive(self) -> bool {
        self.attos > 0 || self.inexact
    }

    /// Convert to basis points, rounding half away from zero.
    ///
    /// `15.005` → 1501, `15.004999` → 1500. A dropped tail never moves a value
    /// across the half-way edge, because the edge is a whole number of units.
    pub fn to_basis_points(self) -> u64 {
        let bp = self.attos.saturating_add(ATTOS_PER_BASIS_POINT / 2) / ATTOS_PER_BASIS_POINT;
        u64::try_from(bp).unwrap_or(u64::MAX)
    }

    /// True if within `tolerance` (inclusive) of `target`.
    ///
    /// `target` and `tolerance` are taken as exact. An inexact value lies
    /// strictly above its stored units, so it passes the lower bound at equality
    /// and fails the upper bound at equality.
    pub fn is_within(self, target: Self, tolerance: Self) -> bool {
        let lower = target.attos.saturating_sub(tolerance.attos);
        let upper = target.attos.saturating_add(tolerance.attos);

        let above_lower = self.attos >= lower;
        let below_upper = if self.inexact {
            self.attos < upper
        } else {
            self.attos <= upper
        };
        above_lower && below_upper
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.attos.checked_add(other.attos).map(|attos| Self {
            attos,
            inexact: self.inexact || other.inexact,
        })
    }

    /// Lossy conversion for display and statistics
    pub fn as_f64(self) -> f64 {
        self.attos as f64 / ATTOS_PER_PERCENT as f64
    }

    /// Parse a percentage numeral.
    ///
    /// Grammar: optional `+`, digits, optional `.` with fraction digits (at least one
    /// digit overall), optional trailing `%`.
    pub fn parse(text: &str) -> PercentResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PercentError::Empty);
        }

        let body = trimmed.strip_suffix('%').map(str::trim_end).unwrap_or(trimmed);
        let body = body.strip_prefix('+').unwrap_or(body);

        let (whole, fraction) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(PercentError::NotANumber(trimmed.to_string()));
        }

        let out_of_range = || PercentError::OutOfRange(trimmed.to_string());

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| out_of_range())?
        };

        let digits = fraction.as_bytes();
        let mut fraction_attos: u128 = 0;
        for i in 0..FRACTION_DIGITS {
            let digit = digits.get(i).map(|b| (b - b'0') as u128).unwrap_or(0);
            fraction_attos = fraction_attos * 10 + digit;
        }
        let inexact = digits.iter().skip(FRACTION_DIGITS).any(|&b| b != b'0');

        let attos = whole_value
            .checked_mul(ATTOS_PER_PERCENT)
            .and_then(|a| a.checked_add(fraction_attos))
            .ok_or_else(out_of_range)?;

        Ok(Self { attos, inexact })
    }

    /// Every stored digit, trailing zeros trimmed (`12.345`, `100`)
    pub fn to_exact_string(self) -> String {
        let whole = self.attos / ATTOS_PER_PERCENT;
        let fraction = self.attos % ATTOS_PER_PERCENT;
        if fraction == 0 {
            return whole.to_string();
        }
        let digits = format!("{:018}", fraction);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Percentage {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Percentage {
    type Output = Percentage;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            attos: self.attos.saturating_add(rhs.attos),
            inexact: self.inexact || rhs.inexact,
        }
    }
}

impl Sum for Percentage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

/// Two decimals, rounded half away from zero (`99.00`, `33.34`)
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = ATTOS_PER_PERCENT / 100;
        let hundredths = self.attos.saturating_add(step / 2) / step;
        write!(f, "{}.{:02}", hundredths / 100, hundredths % 100)
    }
}

// Serialized as the decimal numeral so the value survives JSON and YAML unchanged.
impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_exact_string())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(s: &str) -> Percentage {
        Percentage::parse(s).unwrap()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(pct("30"), Percentage::from_whole(30));
        assert_eq!(pct(" 2.5 "), Percentage::from_micros(2_500_000));
        assert_eq!(pct(".5"), Percentage::from_micros(500_000));
        assert_eq!(pct("7."), Percentage::from_whole(7));
        assert_eq!(pct("+1"), Percentage::from_whole(1));
        assert_eq!(pct("12.5%"), Percentage::from_micros(12_500_000));
        assert_eq!(pct("12.5 %"), Percentage::from_micros(12_500_000));
    }

    #[test]
    fn test_parse_rejects_non_numerals() {
        for bad in ["abc", "1e2", "-5", "inf", "NaN", "1.2.3", ".", "%", "30abc", "1,5"] {
            assert!(Percentage::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(Percentage::parse("   "), Err(PercentError::Empty));
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            Percentage::parse("99999999999999999999999"),
            Err(PercentError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_long_fractions_are_exact_to_eighteen_digits() {
        assert_eq!(pct("0.0000019").to_exact_string(), "0.0000019");
        assert!(!pct("0.123456789012345678").is_inexact());
        assert!(!pct("1.5000000000000000000000").is_inexact());

        let long = pct("0.1234567890123456789");
        assert!(long.is_inexact());
        assert!(long > pct("0.123456789012345678"));
        assert!(long < pct("0.123456789012345679"));
    }

    #[test]
    fn test_tiny_values_stay_positive() {
        assert!(pct("0.0000001").is_positive());
        assert!(pct("0.0000000000000000001").is_positive());
        assert!(!pct("0.0000000000000000000").is_positive());
        assert!(!Percentage::ZERO.is_positive());
    }

    #[test]
    fn test_basis_points_round_half_away_from_zero() {
        assert_eq!(pct("15").to_basis_points(), 1500);
        assert_eq!(pct("15.005").to_basis_points(), 1501);
        assert_eq!(pct("15.004999").to_basis_points(), 1500);
        assert_eq!(pct("15.0049999999999999999").to_basis_points(), 1500);
        assert_eq!(pct("0.005").to_basis_points(), 1);
        assert_eq!(pct("0.0049").to_basis_points(), 0);
        assert_eq!(pct("33.335").to_basis_points(), 3334);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(pct("99").to_string(), "99.00");
        assert_eq!(pct("33.335").to_string(), "33.34");
        assert_eq!(pct("0.004").to_string(), "0.00");
        assert_eq!(Percentage::HUNDRED.to_string(), "100.00");
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let sum: Percentage = ["50", "49.99"].iter().map(|s| pct(s)).sum();
        assert!(sum.is_within(Percentage::HUNDRED, Percentage::SUM_TOLERANCE));

        let sum: Percentage = ["50", "49.989"].iter().map(|s| pct(s)).sum();
        assert!(!sum.is_within(Percentage::HUNDRED, Percentage::SUM_TOLERANCE));

        let sum: Percentage = ["50", "50.01"].iter().map(|s| pct(s)).sum();
        assert!(sum.is_within(Percentage::HUNDRED, Percentage::SUM_TOLERANCE));
    }

    #[test]
    fn test_tolerance_uses_every_digit() {
        let total = |parts: &[&str]| parts.iter().map(|s| pct(s)).sum::<Percentage>();
        let within = |p: Percentage| p.is_within(Percentage::HUNDRED, Percentage::SUM_TOLERANCE);

        assert!(!within(total(&["50", "50.0100009"])));
        assert!(!within(total(&["50.0000009", "50.0099999"])));
        assert!(!within(total(&["50", "49.9899999"])));
        assert!(within(total(&["50", "50.0099999999"])));

        // 100.01 plus a dropped tail is past the bound
        assert!(!within(total(&["50", "50.0100000000000000001"])));
        // 99.99 plus a dropped tail is inside it
        assert!(within(total(&["50", "49.9900000000000000001"])));
    }

    #[test]
    fn test_serde_uses_decimal_numeral() {
        let json = serde_json::to_string(&pct("12.345")).unwrap();
        assert_eq!(json, "\"12.345\"");
        let back: Percentage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pct("12.345"));
        assert_eq!(serde_json::to_string(&Percentage::HUNDRED).unwrap(), "\"100\"");
    }
}
