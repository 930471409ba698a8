pub mod media;
pub mod room_view;
pub mod timeline;
pub mod user_index;

pub use media::*;
pub use room_view::*;
pub use timeline::*;
pub use user_index::*;
