pub mod events;
pub mod hash;
pub mod player_day;
pub mod store;
pub mod timeline;

pub use events::{notability, DayEvent, EventCategory};
pub use hash::snapshot_hash;
pub use player_day::{derive_player_day, PlayerDayRow};
pub use store::PlayerDayStore;
pub use timeline::{build_timeline, summarize_period, PeriodSummary, TimelineEntry};
