pub mod enums;
pub mod error;
pub mod structs;
pub mod wire;

// Re-export the core types to provide a clean public API.
pub use enums::{BoundaryPolicy, TauMode};
pub use error::CoreError;
pub use structs::{parse_iso_date, ChangePoint, DateRange, LogReturnPoint, MatchedEvent};
pub use wire::{ChangePointRecord, LogReturnRecord, MatchedEventRecord, StatusMessage};
