//! Terminal rendering of stats, room lists and room views.

use crate::analytics::RoomView;
use crate::dataset::{RoomEntry, RoomStats, SortDirection};
use crate::session::UserFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod json_renderer;
pub mod text_renderer;

pub use json_renderer::JsonRenderer;
pub use text_renderer::TextRenderer;

/// 出力形式
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Text,
    Json,
}

/// 描画エラー
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// 描画設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// List every image/audio URL of a room
    pub show_media_urls: bool,
    /// Colour avatar badges with ANSI escapes
    pub colour: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_media_urls: true,
            colour: false,
        }
    }
}

/// A selected room as handed to a renderer.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSelection<'a> {
    pub room_id: &'a str,
    pub order: Option<usize>,
    #[serde(flatten)]
    pub view: &'a RoomView,
}

/// フォーマットハンドラートレイト
pub trait Renderer {
    fn stats(&self, stats: &RoomStats) -> Result<String, RenderError>;

    fn room_list(&self, rooms: &[RoomEntry], direction: SortDirection)
        -> Result<String, RenderError>;

    fn room(&self, selection: &RoomSelection<'_>) -> Result<String, RenderError>;

    fn user_filter(&self, filter: &UserFilter) -> Result<String, RenderError>;
}

/// Renderer for the requested format.
pub fn renderer_for(format: RenderFormat, options: RenderOptions) -> Box<dyn Renderer> {
    match format {
        RenderFormat::Text => Box::new(TextRenderer::new(options)),
        RenderFormat::Json => Box::new(JsonRenderer::new()),
    }
}
