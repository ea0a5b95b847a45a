//! Settings for the locale filter, loaded from `.locale-filter.json`.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Fixture file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FixtureMatcher,
    MatcherError,
};
pub use types::{
    AuditConfig,
    ConfigError,
    FilterSettings,
    FixturesConfig,
    PlaceholderConfig,
    ValidationError,
};
