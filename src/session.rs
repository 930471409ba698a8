//! Dashboard session state.
//!
//! Holds what the analyst currently looks at: the loaded dataset, the
//! selected room and its view, the room list direction and the user filter.
//! Transitions are plain methods; the heavy lifting stays in the pure
//! functions of [`crate::analytics`].

use crate::analytics::{aggregate_room, rooms_for_user, RoomView};
use crate::dataset::{Dataset, RoomEntry, RoomStats, SortDirection};
use crate::error::UploadError;
use tracing::{debug, info};

/// Active user filter and the rooms it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub user_id: String,
    pub room_ids: Vec<String>,
}

/// State of one browsing run. Starts empty.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    dataset: Option<Dataset>,
    default_direction: SortDirection,
    direction: SortDirection,
    selected_room: Option<String>,
    room_view: Option<RoomView>,
    user_filter: Option<UserFilter>,
    error: Option<String>,
}

impl DashboardSession {
    /// Create an empty session whose room list starts in `direction`.
    pub fn new(direction: SortDirection) -> Self {
        Self {
            default_direction: direction,
            direction,
            ..Self::default()
        }
    }

    /// Apply the result of an upload attempt.
    ///
    /// Success replaces the dataset wholesale and resets every selection.
    /// Failure clears all data so no stale results sit beside the error.
    pub fn apply_upload(&mut self, result: Result<Dataset, UploadError>) {
        self.selected_room = None;
        self.room_view = None;
        self.user_filter = None;
        self.direction = self.default_direction;

        match result {
            Ok(dataset) => {
                info!(rooms = dataset.stats().unique, "✅ Upload applied");
                self.dataset = Some(dataset);
                self.error = None;
            }
            Err(e) => {
                debug!(error = %e, "❌ Upload failed");
                self.dataset = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Message of the last failed upload.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<RoomStats> {
        self.dataset.as_ref().map(Dataset::stats)
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.direction
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }

    /// Room list in the current direction; empty before an upload.
    pub fn room_list(&self) -> Vec<RoomEntry> {
        self.dataset
            .as_ref()
            .map(|dataset| dataset.rooms(self.direction))
            .unwrap_or_default()
    }

    /// Select a room and rebuild its view. Returns `None` before an upload.
    pub fn select_room(&mut self, room_id: &str) -> Option<&RoomView> {
        let dataset = self.dataset.as_ref()?;
        debug!(room_id = %room_id, "Room selected");
        self.room_view = Some(aggregate_room(dataset.records(), room_id));
        self.selected_room = Some(room_id.to_string());
        self.room_view.as_ref()
    }

    /// Select a room by the display order shown in the room list.
    pub fn select_room_by_order(&mut self, order: usize) -> Option<&RoomView> {
        let room_id = self.dataset.as_ref()?.room_by_order(order)?.to_string();
        self.select_room(&room_id)
    }

    pub fn close_room(&mut self) {
        self.selected_room = None;
        self.room_view = None;
    }

    pub fn selected_room(&self) -> Option<&str> {
        self.selected_room.as_deref()
    }

    pub fn room_view(&self) -> Option<&RoomView> {
        self.room_view.as_ref()
    }

    /// Display order of the selected room.
    pub fn selected_order(&self) -> Option<usize> {
        let room_id = self.selected_room.as_deref()?;
        self.dataset.as_ref()?.order_of(room_id)
    }

    /// Filter rooms by participant. A blank id clears the filter.
    pub fn filter_by_user(&mut self, user_id: &str) -> Option<&UserFilter> {
        if user_id.is_empty() {
            self.clear_filter();
            return None;
        }
        let dataset = self.dataset.as_ref()?;
        self.user_filter = Some(UserFilter {
            user_id: user_id.to_string(),
            room_ids: rooms_for_user(dataset.records(), user_id),
        });
        self.user_filter.as_ref()
    }

    pub fn clear_filter(&mut self) {
        self.user_filter = None;
    }

    pub fn user_filter(&self) -> Option<&UserFilter> {
        self.user_filter.as_ref()
    }
}
