use std::fmt;
use std::str::FromStr;

use anyhow::Context as _;
use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rating::RatingLabel;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Shelf {
    Read,
    CurrentlyReading,
    ToRead,
    Other(String),
}

impl Shelf {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let name = raw.trim().to_ascii_lowercase();
        let shelf = match name.as_str() {
            "" => anyhow::bail!("shelf name is empty"),
            "read" => Self::Read,
            "currently-reading" => Self::CurrentlyReading,
            "to-read" => Self::ToRead,
            _ => Self::Other(name.clone()),
        };
        Ok(shelf)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Read => "read",
            Self::CurrentlyReading => "currently-reading",
            Self::ToRead => "to-read",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Shelf> for String {
    fn from(shelf: Shelf) -> Self {
        shelf.as_str().to_owned()
    }
}

impl TryFrom<String> for Shelf {
    type Error = anyhow::Error;

    fn try_from(raw: String) -> anyhow::Result<Self> {
        Self::parse(&raw)
    }
}

/// Calendar month bucket, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> anyhow::Result<Self> {
        if !(1..=12).contains(&month) {
            anyhow::bail!("month out of range: {month}");
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.trim();
        let (year, month) = raw
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("month must look like YYYY-MM: {raw:?}"))?;
        let year = year
            .parse::<i32>()
            .with_context(|| format!("parse year of month {raw:?}"))?;
        let month = month
            .parse::<u32>()
            .with_context(|| format!("parse month of month {raw:?}"))?;
        Self::new(year, month)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = anyhow::Error;

    fn try_from(raw: String) -> anyhow::Result<Self> {
        raw.parse()
    }
}

/// Identifies one chart segment. Click events echo this back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub month: MonthKey,
    pub rating: RatingLabel,
}

impl SegmentKey {
    pub fn new(month: MonthKey, rating: RatingLabel) -> Self {
        Self { month, rating }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub date_added: Option<NaiveDate>,
    pub shelf: Shelf,
    /// `None` when unrated. A raw rating of `0` never survives construction.
    pub rating: Option<f64>,
    pub pages: u32,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        date_added: Option<NaiveDate>,
        shelf: Shelf,
        rating: Option<f64>,
        pages: u32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            date_added,
            shelf,
            rating: normalize_rating(rating),
            pages,
        }
    }

    pub fn month_key(&self) -> Option<MonthKey> {
        self.date_added.map(MonthKey::from_date)
    }

    pub fn rating_label(&self) -> RatingLabel {
        RatingLabel::from_value(self.rating)
    }

    pub fn segment_key(&self) -> Option<SegmentKey> {
        self.month_key()
            .map(|month| SegmentKey::new(month, self.rating_label()))
    }

    /// One tooltip line: `Title (Author)`.
    pub fn listing(&self) -> String {
        format!("{} ({})", self.title, self.author)
    }
}

fn normalize_rating(rating: Option<f64>) -> Option<f64> {
    rating.filter(|value| value.is_finite() && *value != 0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub month: Option<MonthKey>,
    pub title: String,
    pub author: String,
    pub rating: Option<f64>,
    pub pages: u32,
}

impl From<&BookRecord> for TableRow {
    fn from(record: &BookRecord) -> Self {
        Self {
            month: record.month_key(),
            title: record.title.clone(),
            author: record.author.clone(),
            rating: record.rating,
            pages: record.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_key_formats_zero_padded() {
        let key = MonthKey::from_date(date(2025, 3, 17));
        assert_eq!(key.to_string(), "2025-03");
        assert_eq!("2025-03".parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn month_key_rejects_garbage() {
        assert!("2025".parse::<MonthKey>().is_err());
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("march-2025".parse::<MonthKey>().is_err());
    }

    #[test]
    fn zero_rating_is_normalized_away() {
        let record = BookRecord::new("T", "A", None, Shelf::Read, Some(0.0), 10);
        assert_eq!(record.rating, None);
        assert_eq!(record.rating_label(), RatingLabel::Unrated);
    }

    #[test]
    fn segment_key_needs_a_date() {
        let undated = BookRecord::new("T", "A", None, Shelf::Read, Some(4.0), 10);
        assert_eq!(undated.segment_key(), None);

        let dated = BookRecord::new("T", "A", Some(date(2025, 1, 2)), Shelf::Read, Some(4.0), 10);
        let key = dated.segment_key().unwrap();
        assert_eq!(key.month.to_string(), "2025-01");
        assert_eq!(key.rating, RatingLabel::Stars(4));
    }

    #[test]
    fn shelf_parse_is_case_insensitive() {
        assert_eq!(Shelf::parse(" Read ").unwrap(), Shelf::Read);
        assert_eq!(
            Shelf::parse("currently-reading").unwrap(),
            Shelf::CurrentlyReading
        );
        assert_eq!(
            Shelf::parse("Favorites").unwrap(),
            Shelf::Other("favorites".to_owned())
        );
        assert!(Shelf::parse("  ").is_err());
    }

    #[test]
    fn segment_key_serializes_as_strings() -> anyhow::Result<()> {
        let key = SegmentKey::new("2025-01".parse()?, RatingLabel::Stars(5));
        let json = serde_json::to_value(key)?;
        assert_eq!(json, serde_json::json!({"month": "2025-01", "rating": "5⭐"}));
        let back: SegmentKey = serde_json::from_value(serde_json::json!({"month": "2025-01", "rating": "5"}))?;
        assert_eq!(back, key);
        Ok(())
    }
}
