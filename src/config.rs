use anyhow::Context as _;

use crate::formats::Shelf;

pub const DEFAULT_YEAR: i32 = 2025;
pub const SLIDER_STEP: u32 = 10;

const YEAR_ENV: &str = "SHELFMEKKO_YEAR";
const SHELVES_ENV: &str = "SHELFMEKKO_SHELVES";

/// Which rows of the reading log make up the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    pub year: i32,
    pub shelves: Vec<Shelf>,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            shelves: vec![Shelf::Read, Shelf::CurrentlyReading],
        }
    }
}

impl DatasetSpec {
    pub fn new(year: i32, shelves: &[String]) -> anyhow::Result<Self> {
        let shelves = if shelves.is_empty() {
            Self::default().shelves
        } else {
            shelves
                .iter()
                .map(|raw| Shelf::parse(raw))
                .collect::<anyhow::Result<Vec<_>>>()?
        };
        Ok(Self { year, shelves })
    }

    /// Applies `SHELFMEKKO_YEAR` / `SHELFMEKKO_SHELVES` when set.
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        let year = std::env::var(YEAR_ENV).ok();
        let shelves = std::env::var(SHELVES_ENV).ok();
        self.with_overrides(year.as_deref(), shelves.as_deref())
    }

    pub fn with_overrides(
        mut self,
        year: Option<&str>,
        shelves: Option<&str>,
    ) -> anyhow::Result<Self> {
        if let Some(raw) = year.map(str::trim).filter(|v| !v.is_empty()) {
            self.year = parse_year(raw).with_context(|| format!("invalid {YEAR_ENV}={raw:?}"))?;
        }
        if let Some(raw) = shelves.map(str::trim).filter(|v| !v.is_empty()) {
            self.shelves =
                parse_shelves(raw).with_context(|| format!("invalid {SHELVES_ENV}={raw:?}"))?;
        }
        Ok(self)
    }

    pub fn includes(&self, shelf: &Shelf) -> bool {
        self.shelves.contains(shelf)
    }
}

pub fn parse_year(raw: &str) -> anyhow::Result<i32> {
    let year: i32 = raw.trim().parse().context("year must be an integer")?;
    if !(1000..=9999).contains(&year) {
        anyhow::bail!("year out of range: {year}");
    }
    Ok(year)
}

/// Comma-separated shelf names, e.g. `read,currently-reading`.
pub fn parse_shelves(raw: &str) -> anyhow::Result<Vec<Shelf>> {
    let shelves = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Shelf::parse)
        .collect::<anyhow::Result<Vec<_>>>()?;
    if shelves.is_empty() {
        anyhow::bail!("no shelves given");
    }
    Ok(shelves)
}
