//! Dashboard state: the ordered card collection, the in-flight flag, and the
//! submit/remove operations that mutate them.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{FetchError, Notice, WeatherProvider, WeatherRecord};

/// Ordered collection of records, at most one per city (case-insensitive).
///
/// Insertion order is display order. Records are only appended or removed.
#[derive(Debug, Clone, Default)]
pub struct CityList {
    records: Vec<WeatherRecord>,
}

impl CityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless a record for the same city (ignoring case) is
    /// already present, in which case `record` is handed back.
    pub fn insert_unique(
        &mut self,
        record: WeatherRecord,
    ) -> Result<&WeatherRecord, WeatherRecord> {
        if self.contains(&record.city) {
            return Err(record);
        }

        let idx = self.records.len();
        self.records.push(record);
        Ok(&self.records[idx])
    }

    /// Remove the record whose city equals `city` exactly.
    ///
    /// Unlike insertion this is case-sensitive: "paris" does not remove "Paris".
    pub fn remove(&mut self, city: &str) -> Option<WeatherRecord> {
        let idx = self.records.iter().position(|r| r.city == city)?;
        Some(self.records.remove(idx))
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, city: &str) -> bool {
        self.records.iter().any(|r| r.same_city(city))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a CityList {
    type Item = &'a WeatherRecord;
    type IntoIter = std::slice::Iter<'a, WeatherRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Shared "a fetch is in flight" flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag if it is clear. The returned guard clears it on drop.
    pub fn try_acquire(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard {
                flag: Arc::clone(&self.0),
            })
    }
}

#[derive(Debug)]
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Result of one `Dashboard::submit` call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was empty after trimming. Nothing happened.
    Ignored,
    /// Another fetch is in flight. Nothing happened.
    Busy,
    Added(WeatherRecord),
    /// Provider answered, but the city is already on the dashboard.
    Duplicate(String),
    Failed(FetchError),
}

/// Application root: owns the provider and all dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    cities: CityList,
    loading: LoadingFlag,
    input: String,
    notice: Option<Notice>,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            cities: CityList::new(),
            loading: LoadingFlag::default(),
            input: String::new(),
            notice: None,
        }
    }

    pub fn cities(&self) -> &CityList {
        &self.cities
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle to the in-flight flag, e.g. for a front end that renders a
    /// spinner while `submit` is pending.
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Look up the current input and add it as a card.
    ///
    /// The input is cleared once the provider answers (added or duplicate)
    /// and kept when the lookup fails. The request is never cancelled by
    /// the dashboard; dropping the future only releases the loading flag.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let city = self.input.trim().to_string();
        if city.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let Some(_guard) = self.loading.try_acquire() else {
            tracing::debug!(%city, "submit rejected: a lookup is already in flight");
            return SubmitOutcome::Busy;
        };

        self.notice = None;

        let record = match self.provider.current_weather(&city).await {
            Ok(record) => record,
            Err(err) => {
                // Shown to the user through the notice; not reported above debug.
                tracing::debug!(%city, error = %err, "weather lookup failed");
                self.notice = Some(Notice::from(&err));
                return SubmitOutcome::Failed(err);
            }
        };

        self.input.clear();

        match self.cities.insert_unique(record) {
            Ok(added) => {
                tracing::info!(city = %added.city, "city added");
                SubmitOutcome::Added(added.clone())
            }
            Err(rejected) => {
                tracing::info!(city = %rejected.city, "city already on dashboard");
                self.notice = Some(Notice::AlreadyAdded);
                SubmitOutcome::Duplicate(rejected.city)
            }
        }
    }

    /// Remove the card whose city matches `city` exactly. Returns whether a
    /// card was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let removed = self.cities.remove(city);
        match &removed {
            Some(record) => tracing::info!(city = %record.city, "city removed"),
            None => tracing::debug!(%city, "remove ignored: no exact match"),
        }
        removed.is_some()
    }
}
