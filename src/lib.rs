//! locale-content-filter
//!
//! バイリンガル（中国語／英語）サイトの JSON データを表示ロケール向けに変換するフィルター

pub mod audit;
pub mod cli;
pub mod config;
pub mod detect;
pub mod dictionary;
pub mod filter;
pub mod fixtures;
pub mod memo;
pub mod preference;
pub mod translate;
pub mod types;

pub use detect::contains_chinese;
pub use filter::{
    LocaleFilter,
    filter_value,
};
pub use translate::Translator;
pub use types::Locale;
