//! Orchestration for callers that look holidays up by country: fetch,
//! cache, search.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cache::KeyedCache;
use crate::chain::Chain;
use crate::consts::{DEFAULT_LOOKAHEAD_MONTHS, MAX_LOOKAHEAD_MONTHS};
use crate::policy::Mode;
use crate::provider::{HolidayCalendar, HolidayProvider, HolidayQuery, ProviderError};
use crate::range::{DateRange, RangeError};
use crate::{HolidayDates, compute_chains};

/// Planner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Months of the following year searched after the planning year
    pub lookahead_months: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            lookahead_months: DEFAULT_LOOKAHEAD_MONTHS,
        }
    }
}

impl PlannerConfig {
    /// # Errors
    /// Returns `RangeError::InvalidLookahead` if the lookahead exceeds
    /// `MAX_LOOKAHEAD_MONTHS`.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.lookahead_months > MAX_LOOKAHEAD_MONTHS {
            return Err(RangeError::InvalidLookahead(self.lookahead_months));
        }
        Ok(())
    }
}

/// Errors returned by [`Planner`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Range(#[from] RangeError),
}

type ChainKey = (HolidayQuery, Mode);

/// A search result and whether every year of its horizon had holidays.
#[derive(Debug)]
struct Planned {
    chains:   Vec<Chain>,
    complete: bool,
}

/// Fetches holidays through a provider, runs the search over the planning
/// horizon and keeps both in explicit caches.
#[derive(Debug)]
pub struct Planner<P> {
    provider: P,
    config:   PlannerConfig,
    holidays: KeyedCache<HolidayQuery, HolidayCalendar>,
    chains:   KeyedCache<ChainKey, Planned>,
}

impl<P: HolidayProvider> Planner<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: PlannerConfig::default(),
            holidays: KeyedCache::new(),
            chains: KeyedCache::new(),
        }
    }

    /// # Errors
    /// Returns `PlanError::Range` if the configuration is invalid.
    pub fn with_config(provider: P, config: PlannerConfig) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(provider)
        })
    }

    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Holidays for `query`, fetched once and then served from the cache.
    ///
    /// # Errors
    /// Propagates the provider's error; failures are not cached.
    pub fn holidays(&mut self, query: &HolidayQuery) -> Result<&HolidayCalendar, PlanError> {
        let provider = &self.provider;
        let calendar = self.holidays.get_or_try_insert_with(query.clone(), || {
            debug!("fetching holidays for {} {}", query.country, query.year);
            provider.fetch(query)
        })?;
        Ok(calendar)
    }

    /// Best chains for the planning year of `query` under `mode`.
    ///
    /// The horizon covers the whole year plus the configured lookahead into
    /// the next one. Holidays of the following year are optional: if they
    /// cannot be fetched the search runs on the planning year's holidays,
    /// and the next call searches again instead of serving that result
    /// from the cache.
    ///
    /// # Errors
    /// Returns `PlanError::Provider` if the planning year's holidays cannot
    /// be fetched, or `PlanError::Range` if the horizon cannot be built.
    pub fn plan(&mut self, query: &HolidayQuery, mode: Mode) -> Result<&[Chain], PlanError> {
        let key = (query.clone(), mode);
        if self.chains.get(&key).is_some_and(|planned| planned.complete) {
            debug!("{mode} chains for {} {} served from cache", query.country, query.year);
        } else {
            let planned = self.search(query, mode)?;
            self.chains.insert(key.clone(), planned);
        }
        Ok(self
            .chains
            .get(&key)
            .map_or(&[][..], |planned| planned.chains.as_slice()))
    }

    fn search(&mut self, query: &HolidayQuery, mode: Mode) -> Result<Planned, PlanError> {
        let horizon = DateRange::planning_horizon(query.year, self.config.lookahead_months)?;

        let mut dates: HolidayDates = self.holidays(query)?.keys().copied().collect();
        let mut complete = true;
        if self.config.lookahead_months > 0 {
            let next = query.for_year(query.year + 1);
            match self.holidays(&next) {
                Ok(calendar) => dates.extend(calendar.keys().copied()),
                Err(err) => {
                    warn!("searching {horizon} without {} holidays: {err}", next.year);
                    complete = false;
                },
            }
        }
        dates.retain(|date| horizon.contains(date));

        Ok(Planned {
            chains: compute_chains(horizon.start(), horizon.end(), &dates, mode),
            complete,
        })
    }

    /// Forgets the holidays of `query` and every result that used them.
    pub fn invalidate(&mut self, query: &HolidayQuery) {
        let previous = query.for_year(query.year.saturating_sub(1));
        self.holidays.invalidate(query);
        self.chains
            .invalidate_where(|(cached, _)| cached == query || *cached == previous);
    }

    pub fn clear(&mut self) {
        self.holidays.clear();
        self.chains.clear();
    }
}
