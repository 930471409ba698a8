pub mod analytics;
pub mod config_manager;
pub mod dataset;
pub mod error;
pub mod io;
pub mod palette;
pub mod render;
pub mod session;
pub mod utils;

// Re-export the main error type for convenience
pub use error::UploadError;

// Re-export the dataset model
pub use dataset::{Dataset, Record, RoomEntry, RoomStats, SortDirection};

// Re-export the aggregation entry points
pub use analytics::{aggregate_room, rooms_for_user, ChatMessage, MediaItem, RoomView};

// Re-export upload utilities
pub use io::{upload_file, AbortHandle, ReadOutcome};

pub use session::{DashboardSession, UserFilter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Test that the main types are reachable from the crate root
        assert!(std::any::type_name::<Dataset>().contains("Dataset"));
        assert!(std::any::type_name::<RoomView>().contains("RoomView"));
        assert!(std::any::type_name::<DashboardSession>().contains("DashboardSession"));
    }

    #[test]
    fn test_public_api_availability() {
        let records = vec![Record::from_pairs([("room_id", "r1"), ("user_id", "u1")])];

        let view: RoomView = aggregate_room(&records, "r1");
        assert_eq!(view.total_rows, 1);

        let rooms: Vec<String> = rooms_for_user(&records, "u1");
        assert_eq!(rooms, vec!["r1"]);

        let _outcome: ReadOutcome = ReadOutcome::Aborted;
        let _error: UploadError = UploadError::FileReadAborted;
    }
}
