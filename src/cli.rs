//! Command-line interface of the `locale-filter` binary.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::audit::TextAuditor;
use crate::config::{
    AuditConfig,
    ConfigError,
    ConfigManager,
};
use crate::fixtures::{
    FixtureError,
    find_fixtures,
    load_fixture,
    render_fixture,
};
use crate::preference::{
    FilePreferenceStore,
    PreferenceStore,
};
use crate::types::Locale;

/// File the stored locale preference lives in, relative to the project directory.
pub const PREFERENCE_FILE_NAME: &str = ".locale-preference.json";

#[derive(Debug, Parser)]
#[command(
    name = "locale-filter",
    version,
    about = "Render bilingual JSON fixtures for a display locale"
)]
pub struct Cli {
    /// Directory containing `.locale-filter.json`.
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter one fixture and print the result as JSON.
    Filter {
        file: PathBuf,
        /// Target locale. Defaults to the stored preference.
        #[arg(long)]
        locale: Option<Locale>,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Report Chinese text left in fixtures rendered for a locale.
    Audit {
        /// Directory to search. Defaults to the project directory.
        root: Option<PathBuf>,
        #[arg(long, default_value = "en")]
        locale: Locale,
        /// Audit fixtures as stored, without filtering them first.
        #[arg(long)]
        raw: bool,
    },
    /// Translate a single string as if it were stored under `field`.
    Translate { field: String, text: String },
    /// Show or change the stored locale preference.
    Locale { locale: Option<Locale> },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The audit found untranslated text.
    FindingsRemain,
}

/// Runs `cli`, writing user-facing output to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.project_dir.clone()))?;
    let settings = config_manager.get_settings();
    let preferences = FilePreferenceStore::open(
        cli.project_dir.join(PREFERENCE_FILE_NAME),
        settings.default_locale,
    );

    match cli.command {
        Command::Filter { file, locale, output, pretty } => {
            let locale = locale.unwrap_or_else(|| preferences.get());
            let filter = config_manager.build_filter()?;
            let rendered = render_fixture(&file, locale, &filter)?;
            let json = if pretty {
                serde_json::to_string_pretty(&rendered)?
            } else {
                serde_json::to_string(&rendered)?
            };

            if let Some(path) = output {
                std::fs::write(&path, json)?;
                tracing::info!("Wrote {} fixture to {:?}", locale, path);
            } else {
                writeln!(out, "{json}")?;
            }
            Ok(Outcome::Success)
        }
        Command::Audit { root, locale, raw } => {
            let root = root.unwrap_or_else(|| cli.project_dir.clone());
            let audit = AuditConfig { enabled: true, ..settings.audit };
            audit_fixtures(&root, &config_manager, audit, locale, raw, out)
        }
        Command::Translate { field, text } => {
            let translator = config_manager.build_translator()?;
            writeln!(out, "{}", translator.translate(&field, &text))?;
            Ok(Outcome::Success)
        }
        Command::Locale { locale } => {
            if let Some(locale) = locale {
                preferences.set(locale);
            }
            writeln!(out, "{}", preferences.get())?;
            Ok(Outcome::Success)
        }
    }
}

fn audit_fixtures(
    root: &Path,
    config_manager: &ConfigManager,
    audit: AuditConfig,
    locale: Locale,
    raw: bool,
    out: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let filter = config_manager.build_filter()?;
    let auditor = TextAuditor::new(audit, locale);
    if !auditor.is_active() {
        writeln!(out, "Nothing to audit for the native locale '{locale}'")?;
        return Ok(Outcome::Success);
    }

    let mut outcome = Outcome::Success;
    for path in find_fixtures(root, &config_manager.get_settings().fixtures)? {
        let value =
            if raw { load_fixture(&path)? } else { render_fixture(&path, locale, &filter)? };

        let Some(report) = auditor.audit_value(&value) else {
            continue;
        };
        if !report.is_clean() {
            outcome = Outcome::FindingsRemain;
            writeln!(out, "{}: {report}", path.display())?;
        }
    }

    if outcome == Outcome::Success {
        writeln!(out, "No untranslated Chinese text found")?;
    }
    Ok(outcome)
}
