use super::{RenderError, RenderOptions, Renderer, RoomSelection};
use crate::analytics::{ChatMessage, MediaItem};
use crate::dataset::{RoomEntry, RoomStats, SortDirection};
use crate::palette::{avatar_colour, initials, ANSI_RESET};
use crate::session::UserFilter;
use std::fmt::Write;

const NO_TIME: &str = "(no time)";

/// プレーンテキスト形式レンダラー
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn time_label(create_time: &str) -> &str {
        if create_time.is_empty() {
            NO_TIME
        } else {
            create_time
        }
    }

    fn badge(&self, uid: &str) -> String {
        let colour = avatar_colour(uid);
        if self.options.colour {
            format!("{}[{}]{}", colour.ansi(), initials(uid), ANSI_RESET)
        } else {
            format!("[{}:{}]", initials(uid), colour)
        }
    }

    fn write_chat(&self, out: &mut String, message: &ChatMessage) -> Result<(), RenderError> {
        writeln!(
            out,
            "  {} {} {}: {}",
            Self::time_label(&message.create_time),
            self.badge(&message.uid),
            message.uid,
            message.message
        )?;
        if let Some(audio_url) = &message.audio_url {
            writeln!(out, "      ♪ {}", audio_url)?;
        }
        Ok(())
    }

    fn write_media(
        out: &mut String,
        title: &str,
        items: &[MediaItem],
    ) -> Result<(), RenderError> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(out, "{} ({})", title, items.len())?;
        for item in items {
            writeln!(out, "  {}  {}", Self::time_label(&item.create_time), item.url)?;
        }
        Ok(())
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer for TextRenderer {
    fn stats(&self, stats: &RoomStats) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "Total room ids:     {}", stats.total)?;
        writeln!(out, "Unique room ids:    {}", stats.unique)?;
        writeln!(out, "Duplicate room ids: {}", stats.duplicates)?;
        Ok(out)
    }

    fn room_list(
        &self,
        rooms: &[RoomEntry],
        direction: SortDirection,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        let label = match direction {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        };
        writeln!(out, "Rooms by order, {} ({})", label, rooms.len())?;
        for entry in rooms {
            writeln!(out, "  {}", entry)?;
        }
        Ok(out)
    }

    fn room(&self, selection: &RoomSelection<'_>) -> Result<String, RenderError> {
        let view = selection.view;
        let mut out = String::new();

        match selection.order {
            Some(order) => writeln!(out, "Room #{} {}", order, selection.room_id)?,
            None => writeln!(out, "Room {}", selection.room_id)?,
        }
        writeln!(
            out,
            "Rows: {} | Duration: {} min | JPG: {} | MP3: {} | Chat: {} | Risk labels: {}",
            view.total_rows,
            view.duration_minutes,
            view.jpg_urls.len(),
            view.mp3_urls.len(),
            view.chat_messages.len(),
            view.risk_label_names.len()
        )?;

        if !view.user_ids.is_empty() {
            writeln!(out, "Participants: {}", view.user_ids.join(", "))?;
        }
        if !view.risk_label_names.is_empty() {
            writeln!(out, "Risk labels: {}", view.risk_label_names.join(", "))?;
        }

        if !view.chat_messages.is_empty() {
            writeln!(out, "Chat ({})", view.chat_messages.len())?;
            for message in &view.chat_messages {
                self.write_chat(&mut out, message)?;
            }
        }

        if self.options.show_media_urls {
            Self::write_media(&mut out, "JPG images", &view.jpg_urls)?;
            Self::write_media(&mut out, "MP3 audio", &view.mp3_urls)?;
        }
        if !view.has_media() {
            writeln!(out, "No JPG or MP3 URLs found for this room")?;
        }

        Ok(out)
    }

    fn user_filter(&self, filter: &UserFilter) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(
            out,
            "Rooms with user {} ({})",
            filter.user_id,
            filter.room_ids.len()
        )?;
        for room_id in &filter.room_ids {
            writeln!(out, "  {}", room_id)?;
        }
        Ok(out)
    }
}
