//! 設定管理を行うモジュール

use std::borrow::Cow;
use std::path::PathBuf;

use super::{
    ConfigError,
    FilterSettings,
    loader,
};
use crate::dictionary::PhraseDictionary;
use crate::filter::LocaleFilter;
use crate::translate::Translator;

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: FilterSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: FilterSettings::default(), project_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `project_root` - プロジェクトのルートパス
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.map_or_else(FilterSettings::default, |ps| {
                tracing::debug!("Loaded project settings: {:?}", ps);
                ps
            })
        } else {
            FilterSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: FilterSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &FilterSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub const fn project_root(&self) -> Option<&PathBuf> {
        self.project_root.as_ref()
    }

    /// 現在の設定から翻訳器を作成
    ///
    /// 追加フレーズがなければ組み込み辞書をそのまま使う
    ///
    /// # Errors
    /// - 追加フレーズが不正な場合
    pub fn build_translator(&self) -> Result<Translator, ConfigError> {
        let settings = &self.current_settings;

        let dictionary = if settings.extra_phrases.is_empty() {
            Cow::Borrowed(PhraseDictionary::builtin())
        } else {
            let extra = settings.extra_phrases.iter().map(|(k, v)| (k.clone(), v.clone()));
            Cow::Owned(PhraseDictionary::with_extra(extra)?)
        };

        Ok(Translator::new(dictionary, settings.placeholders.clone()))
    }

    /// 現在の設定からフィルターを作成
    ///
    /// # Errors
    /// - 追加フレーズが不正な場合
    pub fn build_filter(&self) -> Result<LocaleFilter, ConfigError> {
        Ok(LocaleFilter::new(self.build_translator()?))
    }
}
