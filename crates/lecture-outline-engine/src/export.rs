//! Text exports derived from a completed session: chapter timecodes and a trim command.

use crate::models::{LectureSession, Outline, OutlineItem};

const HOUR_MS: i64 = 3_600_000;

/// Format milliseconds as `mm:ss`, or `hh:mm:ss` when there are hours or `force_hours` is set.
pub fn format_time(ms: i64, force_hours: bool) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 || force_hours {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// YouTube chapter list for the covered items, in the order they were covered.
///
/// Offsets are active recording time, so paused stretches cut from the video do
/// not shift later chapters. Chapters must begin at zero, so the outline title
/// opens the list when the first item was covered later.
pub fn youtube_timestamps(outline: &Outline, session: &LectureSession) -> String {
    let mut chapters: Vec<(i64, &OutlineItem)> = session
        .item_timestamps
        .iter()
        .filter_map(|entry| {
            outline
                .item(&entry.item_id)
                .map(|item| (session.active_offset(entry.timestamp), item))
        })
        .collect();
    chapters.sort_by_key(|(offset, _)| *offset);

    let Some((first_offset, _)) = chapters.first() else {
        return String::new();
    };

    let length = session
        .active_duration()
        .unwrap_or_else(|| chapters.last().map_or(0, |(offset, _)| *offset));
    let with_hours = length >= HOUR_MS;

    let mut lines = Vec::with_capacity(chapters.len() + 1);
    if *first_offset >= 1000 {
        lines.push(format!("{} {}", format_time(0, with_hours), outline.title));
    }
    lines.extend(
        chapters
            .iter()
            .map(|(offset, item)| format!("{} {}", format_time(*offset, with_hours), item.title)),
    );
    lines.join("\n")
}

/// A stretch of recording to keep, in milliseconds from the session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSegment {
    pub start_ms: i64,
    pub end_ms: i64,
}

/// The unpaused parts of a completed session. Empty if the session never completed.
pub fn active_segments(session: &LectureSession) -> Vec<ActiveSegment> {
    let start = session.started_at;
    let Some(end) = session.completed_at.filter(|&end| end > start) else {
        return Vec::new();
    };

    let mut pauses: Vec<(i64, i64)> = session
        .paused_intervals
        .iter()
        .map(|interval| {
            let pause_end = if interval.is_open() { end } else { interval.end };
            (interval.start.clamp(start, end), pause_end.clamp(start, end))
        })
        .collect();
    pauses.sort_unstable();

    let mut segments = Vec::new();
    let mut cursor = start;
    for (pause_start, pause_end) in pauses {
        if pause_start > cursor {
            segments.push(ActiveSegment {
                start_ms: cursor - start,
                end_ms: pause_start - start,
            });
        }
        cursor = cursor.max(pause_end);
    }
    if end > cursor {
        segments.push(ActiveSegment {
            start_ms: cursor - start,
            end_ms: end - start,
        });
    }
    segments
}

/// An `ffmpeg` command that keeps only the active segments of a recording.
pub fn trim_command(session: &LectureSession, input: &str, output: &str) -> Option<String> {
    let segments = active_segments(session);
    if segments.is_empty() {
        return None;
    }

    let selection = segments
        .iter()
        .map(|segment| {
            format!(
                "between(t,{:.3},{:.3})",
                segment.start_ms as f64 / 1000.0,
                segment.end_ms as f64 / 1000.0
            )
        })
        .collect::<Vec<_>>()
        .join("+");

    Some(format!(
        "ffmpeg -i \"{input}\" -vf \"select='{selection}',setpts=N/FRAME_RATE/TB\" -af \"aselect='{selection}',asetpts=N/SR/TB\" \"{output}\""
    ))
}
