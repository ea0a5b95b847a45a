//! Storage of the user's locale preference.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
    RwLock,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::Locale;

/// Handle returned by [`PreferenceStore::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Called with the new locale after it changed.
pub type ChangeCallback = Box<dyn Fn(Locale) + Send + Sync>;

/// Where the active locale is read from and written to.
pub trait PreferenceStore: Send + Sync {
    fn get(&self) -> Locale;

    /// Stores `locale`. Subscribers are notified only if the value changed.
    fn set(&self, locale: Locale);

    fn on_change(&self, callback: ChangeCallback) -> SubscriptionId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(SubscriptionId, Arc<dyn Fn(Locale) + Send + Sync>)>>,
}

impl Subscribers {
    fn add(&self, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut callbacks = self.callbacks.lock().unwrap_or_else(PoisonError::into_inner);
        callbacks.push((id, Arc::from(callback)));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.lock().unwrap_or_else(PoisonError::into_inner);
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    fn notify(&self, locale: Locale) {
        // Callbacks run outside the lock so they may call back into the store.
        let callbacks: Vec<_> = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(locale);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.callbacks.lock().unwrap_or_else(PoisonError::into_inner).len();
        f.debug_struct("Subscribers").field("count", &count).finish()
    }
}

/// In-process preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    current: RwLock<Locale>,
    subscribers: Subscribers,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new(initial: Locale) -> Self {
        Self { current: RwLock::new(initial), subscribers: Subscribers::default() }
    }

    /// Replaces the stored locale without notifying anyone. Returns true if it changed.
    fn swap(&self, locale: Locale) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if *current == locale {
            return false;
        }
        *current = locale;
        tracing::debug!(%locale, "Locale preference changed");
        true
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> Locale {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, locale: Locale) {
        if self.swap(locale) {
            self.subscribers.notify(locale);
        }
    }

    fn on_change(&self, callback: ChangeCallback) -> SubscriptionId {
        self.subscribers.add(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }
}

/// On-disk format of [`FilePreferenceStore`].
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    locale: String,
}

/// Preference store persisted as a small JSON file.
///
/// Unreadable files fall back to the default locale. Failed writes are
/// logged; the in-memory preference still changes.
///
/// The file is written before subscribers run, so a callback that calls
/// [`PreferenceStore::set`] again leaves the file matching [`PreferenceStore::get`].
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    inner: MemoryPreferenceStore,
    /// Locale the file currently holds, `None` if missing, unreadable or not normalized.
    /// Held across the in-memory swap and the write so that writes are serialized.
    persisted: Mutex<Option<Locale>>,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, default: Locale) -> Self {
        let path = path.into();
        let stored = Self::read(&path);
        let initial = Locale::resolve(stored.as_deref(), default);
        let persisted = (stored.as_deref() == Some(initial.code())).then_some(initial);
        Self {
            path,
            inner: MemoryPreferenceStore::new(initial),
            persisted: Mutex::new(persisted),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored locale code, if the file could be read.
    fn read(path: &Path) -> Option<String> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No stored locale preference at {:?}", path);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read locale preference {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str::<StoredPreference>(&content) {
            Ok(stored) => Some(stored.locale),
            Err(e) => {
                tracing::warn!("Ignoring corrupt locale preference {:?}: {}", path, e);
                None
            }
        }
    }

    fn write(&self, locale: Locale) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredPreference { locale: locale.code().to_string() };
        std::fs::write(&self.path, serde_json::to_string(&stored)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self) -> Locale {
        self.inner.get()
    }

    fn set(&self, locale: Locale) {
        let changed = {
            let mut persisted = self.persisted.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = self.inner.swap(locale);
            if *persisted != Some(locale) {
                match self.write(locale) {
                    Ok(()) => *persisted = Some(locale),
                    Err(e) => {
                        *persisted = None;
                        tracing::warn!(
                            "Failed to persist locale preference {:?}: {}",
                            self.path,
                            e
                        );
                    }
                }
            }
            changed
        };

        if changed {
            self.inner.subscribers.notify(locale);
        }
    }

    fn on_change(&self, callback: ChangeCallback) -> SubscriptionId {
        self.inner.on_change(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}
