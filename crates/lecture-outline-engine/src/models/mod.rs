pub mod outline;
pub mod parsed_item;
pub mod session;

pub use outline::{Outline, OutlineItem};
pub use parsed_item::{ItemKind, ParsedMarkdownItem};
pub use session::{
    ItemTimestamp, LectureSession, PausedInterval, PausedLectureState, TimerState,
};
