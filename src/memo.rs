//! Locale-reactive memoized access to filtered values.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use crate::filter::LocaleFilter;
use crate::preference::PreferenceStore;
use crate::types::Locale;

/// Last computed result and the inputs it was computed from.
#[derive(Debug, Clone)]
struct CacheEntry {
    source: Arc<Value>,
    locale: Locale,
    value: Arc<Value>,
}

/// Filtered view of a source value.
///
/// Recomputes only when the source reference or the requested locale changes.
#[derive(Debug, Clone)]
pub struct LocalizedView {
    filter: Arc<LocaleFilter>,
    source: Arc<Value>,
    cache: Option<CacheEntry>,
    recompute_count: usize,
}

impl LocalizedView {
    #[must_use]
    pub const fn new(filter: Arc<LocaleFilter>, source: Arc<Value>) -> Self {
        Self { filter, source, cache: None, recompute_count: 0 }
    }

    #[must_use]
    pub const fn source(&self) -> &Arc<Value> {
        &self.source
    }

    /// Replaces the source. Passing the same `Arc` keeps the cache.
    pub fn set_source(&mut self, source: Arc<Value>) {
        self.source = source;
    }

    /// The source filtered for `locale`. For the native locale this is the
    /// source `Arc` itself.
    pub fn get(&mut self, locale: Locale) -> Arc<Value> {
        if let Some(entry) = &self.cache
            && entry.locale == locale
            && Arc::ptr_eq(&entry.source, &self.source)
        {
            return Arc::clone(&entry.value);
        }

        let value = match self.filter.filter(&self.source, locale) {
            Cow::Borrowed(_) => Arc::clone(&self.source),
            Cow::Owned(filtered) => Arc::new(filtered),
        };
        self.recompute_count += 1;
        tracing::trace!(
            %locale,
            recompute_count = self.recompute_count,
            "Recomputed localized view"
        );

        self.cache = Some(CacheEntry {
            source: Arc::clone(&self.source),
            locale,
            value: Arc::clone(&value),
        });
        value
    }

    /// The source filtered for the locale currently stored in `preferences`.
    pub fn get_preferred(&mut self, preferences: &dyn PreferenceStore) -> Arc<Value> {
        self.get(preferences.get())
    }

    /// Number of times the filter actually ran.
    #[must_use]
    pub const fn recompute_count(&self) -> usize {
        self.recompute_count
    }
}
