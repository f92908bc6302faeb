use std::io::Read;
use std::path::Path;

use anyhow::Context as _;
use chrono::{Datelike as _, NaiveDate};
use serde::Deserialize;

use crate::config::DatasetSpec;
use crate::filter::PageRange;
use crate::formats::{BookRecord, Shelf};

const REQUIRED_COLUMNS: [&str; 6] = [
    "Title",
    "Author",
    "My Rating",
    "Number of Pages",
    "Date Added",
    "Exclusive Shelf",
];

const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Row of a Goodreads library export. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: String,
    #[serde(rename = "My Rating", deserialize_with = "csv::invalid_option")]
    rating: Option<f64>,
    #[serde(rename = "Number of Pages", deserialize_with = "csv::invalid_option")]
    pages: Option<u32>,
    #[serde(rename = "Date Added")]
    date_added: String,
    #[serde(rename = "Exclusive Shelf")]
    shelf: String,
}

/// The immutable reading log the dashboard works on.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<BookRecord>,
    spec: DatasetSpec,
}

impl Dataset {
    pub fn new(records: Vec<BookRecord>, spec: DatasetSpec) -> Self {
        Self { records, spec }
    }

    pub fn from_reader<R: Read>(reader: R, spec: &DatasetSpec) -> anyhow::Result<Self> {
        let mut export = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = export.headers().context("read csv header")?.clone();
        let missing: Vec<_> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .copied()
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("reading log is missing columns: {}", missing.join(", "));
        }

        let mut records = Vec::new();
        let mut rows = 0usize;
        for (idx, row) in export.deserialize::<ExportRow>().enumerate() {
            let row = row.with_context(|| format!("parse csv row {}", idx + 2))?;
            rows += 1;
            if let Some(record) = record_from_row(row, spec) {
                records.push(record);
            }
        }

        tracing::info!(
            rows,
            records = records.len(),
            year = spec.year,
            "loaded reading log"
        );
        Ok(Self::new(records, spec.clone()))
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn spec(&self) -> &DatasetSpec {
        &self.spec
    }

    pub fn year(&self) -> i32 {
        self.spec.year
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest page counts; `None` for an empty log.
    pub fn page_bounds(&self) -> Option<PageRange> {
        let min = self.records.iter().map(|r| r.pages).min()?;
        let max = self.records.iter().map(|r| r.pages).max()?;
        Some(PageRange::new(i64::from(min), i64::from(max)))
    }
}

pub fn load(path: &Path, spec: &DatasetSpec) -> anyhow::Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open reading log: {}", path.display()))?;
    Dataset::from_reader(file, spec)
        .with_context(|| format!("read reading log: {}", path.display()))
}

fn record_from_row(row: ExportRow, spec: &DatasetSpec) -> Option<BookRecord> {
    let date_added = parse_date(&row.date_added);
    if date_added.map(|d| d.year()) != Some(spec.year) {
        return None;
    }

    let shelf = Shelf::parse(&row.shelf).ok()?;
    if !spec.includes(&shelf) {
        return None;
    }

    let Some(pages) = row.pages else {
        tracing::warn!(title = %row.title, "skipping book without a page count");
        return None;
    };

    Some(BookRecord::new(
        row.title,
        row.author,
        date_added,
        shelf,
        row.rating,
        pages,
    ))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingLabel;

    const HEADER: &str = "Book Id,Title,Author,My Rating,Number of Pages,Date Read,Date Added,Exclusive Shelf\n";

    fn load_str(body: &str) -> anyhow::Result<Dataset> {
        let csv = format!("{HEADER}{body}");
        Dataset::from_reader(csv.as_bytes(), &DatasetSpec::default())
    }

    #[test]
    fn keeps_only_the_year_and_shelves_of_interest() -> anyhow::Result<()> {
        let dataset = load_str(
            "1,Dune,Frank Herbert,5,412,,2025/01/14,read\n\
             2,Emma,Jane Austen,0,474,,2025/02/01,currently-reading\n\
             3,Ubik,Philip K. Dick,4,202,,2024/12/31,read\n\
             4,Kindred,Octavia Butler,0,264,,2025/03/02,to-read\n",
        )?;

        let titles: Vec<_> = dataset.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Dune", "Emma"]);
        assert_eq!(dataset.records()[1].rating, None);
        assert_eq!(dataset.records()[1].rating_label(), RatingLabel::Unrated);
        Ok(())
    }

    #[test]
    fn malformed_values_drop_the_row() -> anyhow::Result<()> {
        let dataset = load_str(
            "1,No Pages,A,3,,,2025/01/14,read\n\
             2,Bad Date,B,3,100,,someday,read\n\
             3,Fine,C,not-a-number,150,,2025-05-06,read\n",
        )?;
        assert_eq!(dataset.records().len(), 1);
        let fine = &dataset.records()[0];
        assert_eq!(fine.title, "Fine");
        assert_eq!(fine.rating, None);
        assert_eq!(fine.pages, 150);
        Ok(())
    }

    #[test]
    fn missing_columns_fail_the_load() {
        let csv = "Title,Author\nDune,Herbert\n";
        let err = Dataset::from_reader(csv.as_bytes(), &DatasetSpec::default()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("My Rating"), "{msg}");
        assert!(msg.contains("Date Added"), "{msg}");
    }

    #[test]
    fn page_bounds_span_the_log() -> anyhow::Result<()> {
        let dataset = load_str(
            "1,A,a,5,320,,2025/01/14,read\n\
             2,B,b,4,88,,2025/01/15,read\n\
             3,C,c,3,1040,,2025/06/01,read\n",
        )?;
        assert_eq!(dataset.page_bounds(), Some(PageRange::new(88, 1040)));
        assert_eq!(load_str("")?.page_bounds(), None);
        Ok(())
    }
}
