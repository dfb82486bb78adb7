use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `end` value of a pause interval that has not been closed yet
pub const OPEN_INTERVAL_END: i64 = 0;

/// A span of paused time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedInterval {
    pub start: i64,
    pub end: i64,
}

impl PausedInterval {
    pub fn open(start: i64) -> Self {
        Self {
            start,
            end: OPEN_INTERVAL_END,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end == OPEN_INTERVAL_END
    }

    /// Length of the interval, measuring an open interval up to `now`.
    pub fn duration(&self, now: i64) -> i64 {
        let end = if self.is_open() { now } else { self.end };
        (end - self.start).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTimestamp {
    pub item_id: String,
    pub timestamp: i64,
}

/// One timed recording pass against an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureSession {
    pub id: String,
    pub outline_id: String,
    pub started_at: i64,
    pub paused_intervals: Vec<PausedInterval>,
    pub item_timestamps: Vec<ItemTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl LectureSession {
    pub fn new(outline_id: impl Into<String>, started_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            outline_id: outline_id.into(),
            started_at,
            paused_intervals: Vec::new(),
            item_timestamps: Vec::new(),
            completed_at: None,
        }
    }

    pub fn timestamp_for(&self, item_id: &str) -> Option<i64> {
        self.item_timestamps
            .iter()
            .find(|entry| entry.item_id == item_id)
            .map(|entry| entry.timestamp)
    }

    /// Active (unpaused) milliseconds between `started_at` and `at`.
    pub fn active_offset(&self, at: i64) -> i64 {
        let paused: i64 = self
            .paused_intervals
            .iter()
            .map(|interval| {
                let start = interval.start.max(self.started_at);
                let end = if interval.is_open() {
                    at
                } else {
                    interval.end.min(at)
                };
                (end - start).max(0)
            })
            .sum();

        (at - self.started_at - paused).max(0)
    }

    /// Total active time of a completed session.
    pub fn active_duration(&self) -> Option<i64> {
        self.completed_at.map(|end| self.active_offset(end))
    }
}

/// Live timer bookkeeping kept next to the session while it records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub is_running: bool,
    pub start_time: Option<i64>,
    /// Cumulative milliseconds of closed pause intervals
    pub paused_time: i64,
    pub paused_intervals: Vec<PausedInterval>,
}

impl TimerState {
    pub fn running_from(start: i64) -> Self {
        Self {
            is_running: true,
            start_time: Some(start),
            paused_time: 0,
            paused_intervals: Vec::new(),
        }
    }

    pub fn open_interval(&self) -> Option<&PausedInterval> {
        self.paused_intervals.iter().rev().find(|i| i.is_open())
    }

    /// Active milliseconds at `now`, net of closed and open pauses.
    pub fn elapsed(&self, now: i64) -> i64 {
        let Some(start) = self.start_time else {
            return 0;
        };
        let open = match self.open_interval() {
            Some(interval) if !self.is_running => interval.duration(now),
            _ => 0,
        };
        now - start - self.paused_time - open
    }
}

/// Durable snapshot of an in-progress session, restored after a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PausedLectureState {
    pub session: LectureSession,
    pub timer: TimerState,
    pub checked_item_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with_pauses(started_at: i64, pauses: &[(i64, i64)]) -> LectureSession {
        let mut session = LectureSession::new("outline", started_at);
        session.paused_intervals = pauses
            .iter()
            .map(|&(start, end)| PausedInterval { start, end })
            .collect();
        session
    }

    #[test]
    fn test_open_interval_sentinel() {
        let interval = PausedInterval::open(100);
        assert!(interval.is_open());
        assert_eq!(interval.duration(350), 250);

        let closed = PausedInterval {
            start: 100,
            end: 200,
        };
        assert!(!closed.is_open());
        assert_eq!(closed.duration(10_000), 100);
    }

    #[test]
    fn test_active_offset_skips_pauses_before_timestamp() {
        let session = session_with_pauses(1_000, &[(2_000, 3_000), (5_000, 5_500)]);

        assert_eq!(session.active_offset(1_500), 500);
        // Inside the first pause the offset stands still
        assert_eq!(session.active_offset(2_500), 1_000);
        assert_eq!(session.active_offset(4_000), 2_000);
        assert_eq!(session.active_offset(6_000), 3_500);
    }

    #[test]
    fn test_active_offset_with_open_interval() {
        let session = session_with_pauses(0, &[(1_000, OPEN_INTERVAL_END)]);
        assert_eq!(session.active_offset(5_000), 1_000);
    }

    #[test]
    fn test_active_duration_requires_completion() {
        let mut session = session_with_pauses(0, &[(1_000, 2_000)]);
        assert_eq!(session.active_duration(), None);

        session.completed_at = Some(10_000);
        assert_eq!(session.active_duration(), Some(9_000));
    }

    #[test]
    fn test_timer_elapsed_net_of_pauses() {
        let mut timer = TimerState::running_from(1_000);
        assert_eq!(timer.elapsed(4_000), 3_000);

        // Paused at 4000, still paused at 6000
        timer.is_running = false;
        timer.paused_intervals.push(PausedInterval::open(4_000));
        assert_eq!(timer.elapsed(6_000), 3_000);

        // Resumed at 6000
        timer.is_running = true;
        timer.paused_intervals[0].end = 6_000;
        timer.paused_time = 2_000;
        assert_eq!(timer.elapsed(7_000), 4_000);
    }

    #[test]
    fn test_idle_timer_has_no_elapsed_time() {
        assert_eq!(TimerState::default().elapsed(123_456), 0);
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let snapshot = PausedLectureState {
            session: LectureSession::new("o1", 10),
            timer: TimerState::running_from(10),
            checked_item_ids: vec!["a".to_string()],
        };

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["session"]["outlineId"], "o1");
        assert_eq!(json["session"]["startedAt"], 10);
        assert!(json["session"].get("completedAt").is_none());
        assert_eq!(json["timer"]["isRunning"], true);
        assert_eq!(json["timer"]["startTime"], 10);
        assert_eq!(json["checkedItemIds"][0], "a");
    }
}
