//! Per-room view model built from the flat record list.

use super::media::{base_url, classify_url, MediaItem, MediaKind};
use super::timeline::{duration_minutes, sort_by_create_time, Timestamped};
use crate::dataset::Record;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Placeholder some exports write instead of leaving a cell empty.
const NULL_MARKER: &str = "NULL";

/// One line of the reconstructed chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub uid: String,
    pub message: String,
    pub create_time: String,
    /// Audio recorded at exactly the same `create_time`
    #[serde(rename = "audioUrl", default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Timestamped for ChatMessage {
    fn create_time(&self) -> &str {
        &self.create_time
    }
}

/// Everything the analyst sees for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub jpg_urls: Vec<MediaItem>,
    /// Base URLs, one entry per distinct file
    pub mp3_urls: Vec<MediaItem>,
    pub chat_messages: Vec<ChatMessage>,
    pub risk_label_names: Vec<String>,
    pub user_ids: Vec<String>,
    pub duration_minutes: u64,
    pub total_rows: usize,
}

impl RoomView {
    pub fn has_media(&self) -> bool {
        !self.jpg_urls.is_empty() || !self.mp3_urls.is_empty()
    }
}

fn is_null_marker(value: &str) -> bool {
    value.eq_ignore_ascii_case(NULL_MARKER)
}

/// Build the view of `room_id` from scratch.
///
/// Rows match on the exact `room_id` string. An unknown room gives an empty
/// view with `total_rows == 0`.
pub fn aggregate_room(records: &[Record], room_id: &str) -> RoomView {
    let rows: Vec<&Record> = records
        .iter()
        .filter(|record| record.room_id() == Some(room_id))
        .collect();

    let mut jpg_urls = Vec::new();
    let mut mp3_urls = Vec::new();
    let mut seen_audio: HashSet<&str> = HashSet::new();
    let mut audio_by_time: HashMap<&str, &str> = HashMap::new();

    for row in &rows {
        let Some(url) = row.url() else {
            continue;
        };
        let create_time = row.create_time();

        match classify_url(url) {
            Some(MediaKind::Image) => jpg_urls.push(MediaItem::new(url, create_time)),
            Some(MediaKind::Audio) => {
                let base = base_url(url);
                if seen_audio.insert(base) {
                    mp3_urls.push(MediaItem::new(base, create_time));
                }
                // later rows with the same timestamp overwrite earlier ones
                if !create_time.is_empty() {
                    audio_by_time.insert(create_time, base);
                }
            }
            None => {}
        }
    }

    let mut chat_messages: Vec<ChatMessage> = rows
        .iter()
        .filter_map(|row| {
            let uid = row.user_id().filter(|id| !id.trim().is_empty())?;
            let content = row.content()?.trim();
            if content.is_empty() || is_null_marker(content) {
                return None;
            }
            let create_time = row.create_time();
            Some(ChatMessage {
                uid: uid.to_string(),
                message: content.to_string(),
                create_time: create_time.to_string(),
                audio_url: audio_by_time.get(create_time).map(|url| url.to_string()),
            })
        })
        .collect();

    let risk_label_names: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.risk_label_name())
        .map(str::trim)
        .filter(|label| !label.is_empty() && !is_null_marker(label))
        .map(str::to_string)
        .collect();

    let user_ids: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.user_id())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let duration_minutes = duration_minutes(rows.iter().map(|row| row.create_time()));

    sort_by_create_time(&mut jpg_urls);
    sort_by_create_time(&mut mp3_urls);
    sort_by_create_time(&mut chat_messages);

    debug!(
        room_id = %room_id,
        rows = rows.len(),
        jpg = jpg_urls.len(),
        mp3 = mp3_urls.len(),
        chat = chat_messages.len(),
        duration_minutes,
        "🔍 Room aggregated"
    );

    RoomView {
        jpg_urls,
        mp3_urls,
        chat_messages,
        risk_label_names: risk_label_names.into_iter().collect(),
        user_ids: user_ids.into_iter().collect(),
        duration_minutes,
        total_rows: rows.len(),
    }
}
