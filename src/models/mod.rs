use chrono::{Local, NaiveDate};
use std::fmt;

/// Property category a source listing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Houses,
    Flats,
}

impl Category {
    /// Label used in the digest headings and the CSV `category` column
    pub fn label(&self) -> &'static str {
        match self {
            Category::Houses => "Kuće",
            Category::Flats => "Stanovi",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One listing discovered on a source and judged to be posted today.
///
/// Prices and areas stay in the source's own formatting. `None` is the
/// "not available" marker; every field is always present on the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ad {
    pub title: String,
    pub href: String,
    pub price: Option<String>,
    pub price_per_m2: Option<String>,
    pub area: Option<String>,
    pub number_of_rooms: Option<String>,
    pub year_built: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<String>,
    pub source: Option<String>,
}

impl Ad {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            ..Self::default()
        }
    }
}

/// The calendar day a run started on.
///
/// Computed once at process start and handed to every adapter, so a run that
/// crosses midnight keeps comparing against the day it began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDate {
    date: NaiveDate,
}

impl RunDate {
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { date }
    }

    /// `16.10.2026.`
    pub fn full_label(&self) -> String {
        self.date.format("%d.%m.%Y.").to_string()
    }

    /// `16.10.26`
    pub fn short_label(&self) -> String {
        self.date.format("%d.%m.%y").to_string()
    }

    /// `2026-10-16`
    pub fn iso_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
