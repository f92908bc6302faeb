use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display bucket derived from a star rating.
///
/// Ordering follows stacking order: `Unrated` first, then stars ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RatingLabel {
    Unrated,
    Stars(u8),
    /// Non-integer rating, in tenths of a star.
    Fractional(u16),
}

/// The closed set of chart buckets, in stacking order.
pub const BUCKETS: [RatingLabel; 6] = [
    RatingLabel::Unrated,
    RatingLabel::Stars(1),
    RatingLabel::Stars(2),
    RatingLabel::Stars(3),
    RatingLabel::Stars(4),
    RatingLabel::Stars(5),
];

impl RatingLabel {
    /// `None`, zero and non-finite values are all "unrated".
    pub fn from_value(value: Option<f64>) -> Self {
        let Some(value) = value.filter(|v| v.is_finite() && *v > 0.0) else {
            return Self::Unrated;
        };
        if value.fract() == 0.0 && value <= f64::from(u8::MAX) {
            return Self::Stars(value as u8);
        }
        let tenths = (value * 10.0).round().min(f64::from(u16::MAX));
        Self::Fractional(tenths as u16)
    }

    /// Palette color for the six chart buckets (ColorBrewer RdPu).
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Self::Unrated => Some("#fde0dd"),
            Self::Stars(1) => Some("#fcc5c0"),
            Self::Stars(2) => Some("#fa9fb5"),
            Self::Stars(3) => Some("#dd3497"),
            Self::Stars(4) => Some("#7a0177"),
            Self::Stars(5) => Some("#49006a"),
            _ => None,
        }
    }

    pub fn is_bucket(&self) -> bool {
        BUCKETS.contains(self)
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrated => f.write_str("Unrated"),
            Self::Stars(n) => write!(f, "{n}⭐"),
            Self::Fractional(tenths) => write!(f, "{:.1}⭐", f64::from(*tenths) / 10.0),
        }
    }
}

impl FromStr for RatingLabel {
    type Err = anyhow::Error;

    /// Accepts `Unrated`, `5`, `5⭐` and `4.5⭐`.
    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("unrated") {
            return Ok(Self::Unrated);
        }
        let number = raw.trim_end_matches('⭐').trim();
        let value: f64 = number
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid rating label {raw:?}: {err}"))?;
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("invalid rating label {raw:?}: must be a non-negative number");
        }
        Ok(Self::from_value(Some(value)))
    }
}

impl Serialize for RatingLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RatingLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_null_are_both_unrated() {
        assert_eq!(RatingLabel::from_value(None), RatingLabel::Unrated);
        assert_eq!(RatingLabel::from_value(Some(0.0)), RatingLabel::Unrated);
        assert_eq!(RatingLabel::from_value(Some(f64::NAN)), RatingLabel::Unrated);
    }

    #[test]
    fn integer_ratings_become_star_labels() {
        for n in 1..=5u8 {
            let label = RatingLabel::from_value(Some(f64::from(n)));
            assert_eq!(label, RatingLabel::Stars(n));
            assert_eq!(label.to_string(), format!("{n}⭐"));
        }
    }

    #[test]
    fn fractional_ratings_keep_one_decimal() {
        let label = RatingLabel::from_value(Some(4.5));
        assert_eq!(label, RatingLabel::Fractional(45));
        assert_eq!(label.to_string(), "4.5⭐");
        assert!(!label.is_bucket());
        assert_eq!(label.color(), None);
    }

    #[test]
    fn parse_accepts_with_and_without_star() {
        assert_eq!("5".parse::<RatingLabel>().unwrap(), RatingLabel::Stars(5));
        assert_eq!("5⭐".parse::<RatingLabel>().unwrap(), RatingLabel::Stars(5));
        assert_eq!(" unrated ".parse::<RatingLabel>().unwrap(), RatingLabel::Unrated);
        assert_eq!("0".parse::<RatingLabel>().unwrap(), RatingLabel::Unrated);
        assert!("five".parse::<RatingLabel>().is_err());
        assert!("-1".parse::<RatingLabel>().is_err());
    }

    #[test]
    fn buckets_are_in_stacking_order_with_distinct_colors() {
        let mut sorted = BUCKETS;
        sorted.sort();
        assert_eq!(sorted, BUCKETS);

        let colors: std::collections::HashSet<_> =
            BUCKETS.iter().filter_map(RatingLabel::color).collect();
        assert_eq!(colors.len(), BUCKETS.len());
    }
}
