//! Which rooms a user took part in.

use crate::dataset::Record;
use std::collections::BTreeSet;
use tracing::debug;

/// Distinct rooms where `user_id` appears, sorted ordinally.
///
/// Identifiers are compared after trimming on both sides; a blank query
/// matches nothing. Room ids are returned as written, blank ones included.
pub fn rooms_for_user(records: &[Record], user_id: &str) -> Vec<String> {
    let target = user_id.trim();
    if target.is_empty() {
        return Vec::new();
    }

    let rooms: BTreeSet<&str> = records
        .iter()
        .filter(|record| record.user_id().map(str::trim) == Some(target))
        .filter_map(Record::room_id)
        .collect();

    debug!(user_id = %target, rooms = rooms.len(), "👤 Rooms for user");

    rooms.into_iter().map(str::to_string).collect()
}
