//! Holiday data provider interface.
//!
//! Fetching public holidays from a remote service is the caller's business;
//! the search only needs the resulting date set. This module defines the
//! seam and an in-memory implementation.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Holiday names by date.
pub type HolidayCalendar = BTreeMap<NaiveDate, Vec<String>>;

/// Which holidays to fetch. Also the cache key for holiday data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolidayQuery {
    /// ISO 3166-1 alpha-2 country code
    pub country:  String,
    pub year:     i32,
    /// Region within the country, e.g. a state code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Holiday types to include; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types:    Vec<String>,
}

impl HolidayQuery {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
            location: None,
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self.types.sort();
        self.types.dedup();
        self
    }

    /// Same filter, another year
    #[must_use]
    pub fn for_year(&self, year: i32) -> Self {
        Self { year, ..self.clone() }
    }
}

/// Errors returned by [`HolidayProvider::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider knows nothing about the country.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// The provider could not be reached or answered badly.
    #[error("holiday source unavailable: {0}")]
    Unavailable(String),
}

/// Source of public holidays.
///
/// Implementations may be slow or fail; callers cache the results.
pub trait HolidayProvider {
    /// Fetches the holidays of one country and year.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] when the data cannot be produced.
    fn fetch(&self, query: &HolidayQuery) -> Result<HolidayCalendar, ProviderError>;
}

impl<P: HolidayProvider + ?Sized> HolidayProvider for &P {
    fn fetch(&self, query: &HolidayQuery) -> Result<HolidayCalendar, ProviderError> {
        (**self).fetch(query)
    }
}

/// One holiday known to a [`StaticHolidayProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date:      NaiveDate,
    pub name:      String,
    pub kind:      String,
    /// Regions observing the holiday; empty means nationwide
    #[serde(default)]
    pub locations: Vec<String>,
}

/// In-memory provider, for embedding fixed tables and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayProvider {
    entries: HashMap<String, Vec<HolidayEntry>>,
}

impl StaticHolidayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a holiday for `country`.
    pub fn insert(&mut self, country: impl Into<String>, entry: HolidayEntry) -> &mut Self {
        self.entries.entry(country.into()).or_default().push(entry);
        self
    }

    /// Registers a nationwide holiday of type `public`.
    pub fn insert_public(&mut self, country: impl Into<String>, date: NaiveDate, name: impl Into<String>) -> &mut Self {
        self.insert(country, HolidayEntry {
            date,
            name: name.into(),
            kind: "public".to_owned(),
            locations: Vec::new(),
        })
    }

    fn matches(entry: &HolidayEntry, query: &HolidayQuery) -> bool {
        entry.date.year() == query.year
            && (query.types.is_empty() || query.types.contains(&entry.kind))
            && (entry.locations.is_empty()
                || query
                    .location
                    .as_ref()
                    .is_some_and(|location| entry.locations.contains(location)))
    }
}

impl HolidayProvider for StaticHolidayProvider {
    fn fetch(&self, query: &HolidayQuery) -> Result<HolidayCalendar, ProviderError> {
        let entries = self
            .entries
            .get(&query.country)
            .ok_or_else(|| ProviderError::UnknownCountry(query.country.clone()))?;

        let mut calendar = HolidayCalendar::new();
        for entry in entries.iter().filter(|e| Self::matches(e, query)) {
            calendar.entry(entry.date).or_default().push(entry.name.clone());
        }
        Ok(calendar)
    }
}
