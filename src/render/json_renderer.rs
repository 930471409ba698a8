use super::{RenderError, Renderer, RoomSelection};
use crate::dataset::{RoomEntry, RoomStats, SortDirection};
use crate::session::UserFilter;
use serde::Serialize;
use serde_json::json;

/// JSON形式レンダラー
pub struct JsonRenderer {
    pretty_print: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, RenderError> {
        let output = if self.pretty_print {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JsonRenderer {
    fn stats(&self, stats: &RoomStats) -> Result<String, RenderError> {
        self.encode(stats)
    }

    fn room_list(
        &self,
        rooms: &[RoomEntry],
        direction: SortDirection,
    ) -> Result<String, RenderError> {
        self.encode(&json!({
            "direction": direction,
            "rooms": rooms,
        }))
    }

    fn room(&self, selection: &RoomSelection<'_>) -> Result<String, RenderError> {
        self.encode(selection)
    }

    fn user_filter(&self, filter: &UserFilter) -> Result<String, RenderError> {
        self.encode(&json!({
            "userId": filter.user_id,
            "roomIds": filter.room_ids,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RoomView;

    #[test]
    fn test_room_list_json() {
        let rooms = vec![RoomEntry {
            room_id: "r1".to_string(),
            order: 1,
        }];
        let output = JsonRenderer::new()
            .with_pretty_print(false)
            .room_list(&rooms, SortDirection::Desc)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["direction"], "desc");
        assert_eq!(value["rooms"][0]["roomId"], "r1");
        assert_eq!(value["rooms"][0]["order"], 1);
    }

    #[test]
    fn test_room_json_flattens_view() {
        let view = RoomView {
            total_rows: 4,
            duration_minutes: 12,
            ..RoomView::default()
        };
        let selection = RoomSelection {
            room_id: "r9",
            order: Some(2),
            view: &view,
        };
        let output = JsonRenderer::new().room(&selection).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["roomId"], "r9");
        assert_eq!(value["order"], 2);
        assert_eq!(value["totalRows"], 4);
        assert_eq!(value["durationMinutes"], 12);
        assert!(value["chatMessages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_user_filter_json() {
        let filter = UserFilter {
            user_id: "u1".to_string(),
            room_ids: vec!["a".to_string(), "b".to_string()],
        };
        let output = JsonRenderer::new().user_filter(&filter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["roomIds"][1], "b");
    }
}
