// ログ関連ユーティリティ

use crate::config_manager::{ConfigManager, LogConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "roomscope.log";

/// ログ出力先ディレクトリ（設定優先、なければXDGデータディレクトリ）
pub fn resolve_log_dir(config: &LogConfig) -> Result<PathBuf> {
    match &config.log_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(ConfigManager::project_dirs()?.data_local_dir().join("logs")),
    }
}

/// ログ初期化
///
/// `RUST_LOG` wins over the configured level. Console output goes to stderr
/// so rendered results on stdout stay clean. When file logging is enabled the
/// returned guard must be held until exit to flush the writer.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log level: {}", config.log_level))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let (file_layer, guard) = if config.enable_file_logging {
        let log_dir = resolve_log_dir(config)?;
        fs::create_dir_all(&log_dir).with_context(|| {
            format!("Failed to create log directory: {}", log_dir.display())
        })?;
        cleanup_old_logs(&log_dir, config.max_log_files)?;

        let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// 古いログファイルを削除し、最新 `keep` 件だけを残す
///
/// Daily files are named `roomscope.log.YYYY-MM-DD`, so name order is age
/// order. Returns how many files were removed.
pub fn cleanup_old_logs(log_dir: &Path, keep: usize) -> Result<usize> {
    let pattern = log_dir.join(format!("{}*", LOG_FILE_PREFIX));
    let pattern = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid log file pattern: {}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let excess = files.len().saturating_sub(keep);
    let mut removed = 0;
    for path in files.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("🗑️ Removed old log file: {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to remove log file {}: {}", path.display(), e),
        }
    }

    Ok(removed)
}
