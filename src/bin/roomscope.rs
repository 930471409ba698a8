//! roomscope CLI: load a room activity export and browse rooms, transcripts
//! and participants from the terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use roomscope::{
    config_manager::{AppConfig, ConfigManager},
    io::upload_file,
    render::{renderer_for, RenderFormat, Renderer, RoomSelection},
    utils, AbortHandle, DashboardSession, SortDirection,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// 128 + SIGINT
const SIGINT_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(name = "roomscope")]
#[command(about = "Browse per-room media, chat transcripts and risk labels of a room activity CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<RenderFormat>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total, unique and duplicate room id counts.
    Stats { file: PathBuf },
    /// Unique rooms with their display order.
    Rooms {
        file: PathBuf,
        /// List in reverse order
        #[arg(long)]
        desc: bool,
    },
    /// Media, transcript and metadata of one room.
    Room {
        file: PathBuf,
        #[arg(required_unless_present = "order")]
        room_id: Option<String>,
        /// Pick the room by its display order instead of its id
        #[arg(long, conflicts_with = "room_id")]
        order: Option<usize>,
    },
    /// Rooms a user took part in.
    User { file: PathBuf, user_id: String },
    /// One room followed by the rooms of each of its participants.
    Show { file: PathBuf, room_id: String },
    /// Print the config file path and its current values.
    Config {
        /// Overwrite the config file with defaults first
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let config_result = config_manager.load_config();
    let mut config = config_result.as_ref().cloned().unwrap_or_default();
    if cli.verbose {
        config.log.log_level = "debug".to_string();
    }

    let _log_guard = utils::init_logging(&config.log)?;
    if let Err(e) = &config_result {
        tracing::warn!("設定読み込みエラー、デフォルト設定を使用: {:#}", e);
    }

    tracing::debug!("🎬 Starting roomscope");

    // Ctrl+Cシグナルハンドラー
    // 読み込み中なら中断として報告させ、それ以外は即終了する
    let abort = AbortHandle::new();
    {
        let abort = abort.clone();
        ctrlc::set_handler(move || {
            if abort.abort() {
                tracing::info!("🛑 終了シグナルを受信しました（読み込み後に中断）");
            } else {
                std::process::exit(SIGINT_EXIT_CODE);
            }
        })
        .context("Failed to set signal handler")?;
    }

    let format = cli.format.unwrap_or(config.render_format);
    let renderer = renderer_for(format, config.render_options());
    let mut session = DashboardSession::new(config.default_sort);

    match cli.command {
        Commands::Stats { file } => {
            open(&mut session, &file, &abort)?;
            if let Some(stats) = session.stats() {
                print!("{}", renderer.stats(&stats)?);
            }
        }
        Commands::Rooms { file, desc } => {
            open(&mut session, &file, &abort)?;
            if desc {
                session.set_sort_direction(SortDirection::Desc);
            }
            print!(
                "{}",
                renderer.room_list(&session.room_list(), session.sort_direction())?
            );
        }
        Commands::Room {
            file,
            room_id,
            order,
        } => {
            open(&mut session, &file, &abort)?;
            let selected = match (room_id, order) {
                (_, Some(order)) => session.select_room_by_order(order).is_some(),
                (Some(room_id), None) => session.select_room(&room_id).is_some(),
                (None, None) => false,
            };
            if !selected {
                bail!("Room not found in the loaded file");
            }
            print_selected_room(&session, renderer.as_ref())?;
        }
        Commands::User { file, user_id } => {
            open(&mut session, &file, &abort)?;
            if let Some(filter) = session.filter_by_user(&user_id) {
                print!("{}", renderer.user_filter(filter)?);
            }
        }
        Commands::Show { file, room_id } => {
            open(&mut session, &file, &abort)?;
            let user_ids = session
                .select_room(&room_id)
                .map(|view| view.user_ids.clone())
                .unwrap_or_default();
            print_selected_room(&session, renderer.as_ref())?;
            for user_id in user_ids {
                if let Some(filter) = session.filter_by_user(&user_id) {
                    print!("{}", renderer.user_filter(filter)?);
                }
            }
            session.clear_filter();
        }
        Commands::Config { reset } => show_config(&config_manager, reset, format)?,
    }

    Ok(())
}

/// Upload the file into the session, surfacing the upload error message.
fn open(session: &mut DashboardSession, file: &Path, abort: &AbortHandle) -> Result<()> {
    session.apply_upload(upload_file(file, None, abort));
    if let Some(message) = session.error() {
        bail!("{}", message);
    }
    Ok(())
}

fn print_selected_room(session: &DashboardSession, renderer: &dyn Renderer) -> Result<()> {
    let (Some(room_id), Some(view)) = (session.selected_room(), session.room_view()) else {
        return Ok(());
    };
    let selection = RoomSelection {
        room_id,
        order: session.selected_order(),
        view,
    };
    print!("{}", renderer.room(&selection)?);
    Ok(())
}

fn show_config(manager: &ConfigManager, reset: bool, format: RenderFormat) -> Result<()> {
    if reset {
        manager.reset_config()?;
    }
    let config = manager.load_config()?;
    let path = manager.get_config_file_path();

    match format {
        RenderFormat::Json => {
            let value = serde_json::json!({
                "path": path,
                "exists": manager.config_exists(),
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        RenderFormat::Text => {
            let exists = if manager.config_exists() { "" } else { " (not created yet)" };
            println!("# {}{}", path.display(), exists);
            print!("{}", toml::to_string_pretty::<AppConfig>(&config)?);
        }
    }
    Ok(())
}
