pub mod export;
pub mod io;
pub mod models;
pub mod parsing;
pub mod service;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use export::{format_time, trim_command, youtube_timestamps};
pub use io::{FileStore, KeyValueStore, MemoryStore, Storage, StoreError};
pub use models::{
    ItemKind, ItemTimestamp, LectureSession, Outline, OutlineItem, ParsedMarkdownItem,
    PausedInterval, PausedLectureState, TimerState,
};
pub use parsing::{MarkdownParseResult, parse_markdown_list};
pub use service::{ImportError, OutlineService};
pub use session::{Clock, ManualClock, SessionTimer, SystemClock, TimerEvent};
