//! Loaded dataset: all records of one upload plus room-level bookkeeping.
//!
//! A dataset is built once per upload and replaced wholesale by the next one.

pub mod record;

pub use record::{columns, Record};

use crate::error::UploadError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Room identifier counts over the whole upload.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[display("total={total} unique={unique} duplicates={duplicates}")]
pub struct RoomStats {
    /// Rows carrying a non-blank `room_id`
    pub total: usize,
    /// Distinct room identifiers
    pub unique: usize,
    /// `total - unique`
    pub duplicates: usize,
}

/// A unique room and its 1-based display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
#[display("#{order} {room_id}")]
pub struct RoomEntry {
    pub room_id: String,
    pub order: usize,
}

/// Direction of the room list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Assignment order (1, 2, 3, ...)
    #[default]
    Asc,
    /// Reverse assignment order
    Desc,
}

/// The parsed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
    all_room_ids: Vec<String>,
    rooms: Vec<RoomEntry>,
    order_index: HashMap<String, usize>,
    stats: RoomStats,
}

impl Dataset {
    /// Validate parsed records and derive room ids, stats and display order.
    ///
    /// Fails when there are no records at all, or when the first record has
    /// no `room_id` value.
    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Result<Self, UploadError> {
        let first = records.first().ok_or(UploadError::EmptyParsedDataset)?;
        if first.room_id().map_or(true, str::is_empty) {
            return Err(UploadError::missing_field(columns::ROOM_ID));
        }

        let all_room_ids: Vec<String> = records
            .iter()
            .filter_map(Record::room_id)
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .collect();

        let mut seen = HashSet::new();
        let rooms: Vec<RoomEntry> = all_room_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .enumerate()
            .map(|(index, id)| RoomEntry {
                room_id: id.clone(),
                order: index + 1,
            })
            .collect();

        let order_index = rooms
            .iter()
            .map(|entry| (entry.room_id.clone(), entry.order))
            .collect();

        let stats = RoomStats {
            total: all_room_ids.len(),
            unique: rooms.len(),
            duplicates: all_room_ids.len() - rooms.len(),
        };

        info!(
            rows = records.len(),
            columns = headers.len(),
            total = stats.total,
            unique = stats.unique,
            duplicates = stats.duplicates,
            "📊 Dataset loaded"
        );

        Ok(Self {
            headers,
            records,
            all_room_ids,
            rooms,
            order_index,
            stats,
        })
    }

    /// Header columns in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Every non-blank `room_id` in row order, duplicates included.
    pub fn all_room_ids(&self) -> &[String] {
        &self.all_room_ids
    }

    /// Unique room ids in first-occurrence order.
    pub fn unique_room_ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|entry| entry.room_id.as_str())
    }

    pub fn stats(&self) -> RoomStats {
        self.stats
    }

    /// Rooms with their display order, listed in the requested direction.
    pub fn rooms(&self, direction: SortDirection) -> Vec<RoomEntry> {
        match direction {
            SortDirection::Asc => self.rooms.clone(),
            SortDirection::Desc => self.rooms.iter().rev().cloned().collect(),
        }
    }

    pub fn order_of(&self, room_id: &str) -> Option<usize> {
        self.order_index.get(room_id).copied()
    }

    /// Room id that received the given display order.
    pub fn room_by_order(&self, order: usize) -> Option<&str> {
        order
            .checked_sub(1)
            .and_then(|index| self.rooms.get(index))
            .map(|entry| entry.room_id.as_str())
    }
}
