//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use crate::dataset::SortDirection;
use crate::render::{RenderFormat, RenderOptions};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// ログ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
    /// 保存するログファイル数上限
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "warn".to_string(),
            enable_file_logging: false,
            max_log_files: 30,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 出力形式
    #[serde(default)]
    pub render_format: RenderFormat,

    /// ルーム一覧の初期ソート順
    #[serde(default)]
    pub default_sort: SortDirection,

    /// 画像・音声URLを一覧表示するか
    #[serde(default = "default_true")]
    pub show_media_urls: bool,

    /// ターミナル出力の色付け
    #[serde(default)]
    pub colour: bool,

    /// ログ設定
    #[serde(default)]
    pub log: LogConfig,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render_format: RenderFormat::Text,
            default_sort: SortDirection::Asc,
            show_media_urls: true,
            colour: false,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_media_urls: self.show_media_urls,
            colour: self.colour,
        }
    }
}

/// 設定管理マネージャー
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリを使う設定マネージャーを作成
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Ok(Self { config_path })
    }

    /// 任意のパスを使う設定マネージャーを作成
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// プロジェクトディレクトリ（ログの既定保存先にも使用）
    pub fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "sifyfy", "roomscope").context("Failed to get project directories")
    }

    /// XDGディレクトリに基づく設定ファイルパスを取得
    fn get_config_path() -> Result<PathBuf> {
        let project_dirs = Self::project_dirs()?;
        let config_file = project_dirs.config_dir().join("config.toml");

        debug!("Config file path: {}", config_file.display());

        Ok(config_file)
    }

    /// 設定を読み込み（ファイルがなければデフォルト）
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = &self.config_path;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))
            }
        };

        let config = toml::from_str::<AppConfig>(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// 設定を保存
    ///
    /// 一時ファイル `*.toml.tmp` に書いてから rename で置き換える
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let path = &self.config_path;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let body = toml::to_string_pretty(config).context("Failed to serialize config")?;
        let staging = path.with_extension("toml.tmp");
        fs::write(&staging, body)
            .with_context(|| format!("Failed to write config file: {}", staging.display()))?;
        fs::rename(&staging, path)
            .with_context(|| format!("Failed to replace config file: {}", path.display()))?;

        info!(path = %path.display(), "💾 Config saved");
        Ok(())
    }

    /// 設定ファイルパスを取得
    pub fn get_config_file_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// 設定をリセット（デフォルト値に戻す）
    pub fn reset_config(&self) -> Result<()> {
        info!("🔄 Resetting config to defaults");
        self.save_config(&AppConfig::default())
    }

    /// 設定ファイルが存在するかチェック
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}
