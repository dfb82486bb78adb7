//! Lecture session timer.
//!
//! One [`SessionTimer`] records one lecture at a time:
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//!                    |                  |
//!                    +------stop--------+----> Idle
//! ```
//!
//! Calls that do not apply to the current state are ignored, so repeated UI
//! events cannot corrupt a session. Every change to an active session is
//! written to the paused-session slot so it can be restored after a restart.

pub mod clock;
pub mod events;

use std::sync::mpsc::Receiver;

use crate::io::{KeyValueStore, Storage};
use crate::models::{
    ItemTimestamp, LectureSession, Outline, PausedInterval, PausedLectureState, TimerState,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{EventBus, TimerEvent};

pub struct SessionTimer<S, C = SystemClock> {
    storage: Storage<S>,
    clock: C,
    current: Option<LectureSession>,
    timer: TimerState,
    checked: Vec<String>,
    events: EventBus,
}

impl<S: KeyValueStore, C: Clock> SessionTimer<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            storage: Storage::new(store),
            clock,
            current: None,
            timer: TimerState::default(),
            checked: Vec::new(),
            events: EventBus::default(),
        }
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn subscribe(&mut self) -> Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub fn current_session(&self) -> Option<&LectureSession> {
        self.current.as_ref()
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some() && self.timer.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.current.is_some() && !self.timer.is_running
    }

    pub fn checked_item_ids(&self) -> &[String] {
        &self.checked
    }

    pub fn is_item_checked(&self, item_id: &str) -> bool {
        self.checked.iter().any(|id| id == item_id)
    }

    /// Begin recording against `outline`.
    ///
    /// An unfinished session is replaced, and any stored paused session is discarded.
    pub fn start_lecture(&mut self, outline: &Outline) -> LectureSession {
        let now = self.clock.now_ms();
        if let Some(previous) = &self.current {
            log::warn!("Discarding unfinished session {}", previous.id);
        }

        let session = LectureSession::new(outline.id.as_str(), now);
        self.current = Some(session.clone());
        self.timer = TimerState::running_from(now);
        self.checked.clear();
        self.storage.clear_paused_state();

        log::info!("Started session {} for outline {}", session.id, outline.id);
        self.events.publish(TimerEvent::Started {
            session_id: session.id.clone(),
        });
        session
    }

    pub fn pause_lecture(&mut self) {
        if !self.timer.is_running {
            return;
        }
        let Some(session) = self.current.as_mut() else {
            return;
        };

        let now = self.clock.now_ms();
        let interval = PausedInterval::open(now);
        self.timer.is_running = false;
        self.timer.paused_intervals.push(interval);
        session.paused_intervals.push(interval);

        log::debug!("Paused session {} at {now}", session.id);
        self.persist_snapshot();
        self.events.publish(TimerEvent::Paused { at: now });
    }

    pub fn resume_lecture(&mut self) {
        if self.timer.is_running || self.current.is_none() {
            return;
        }

        let now = self.clock.now_ms();
        self.timer.is_running = true;
        self.close_open_interval(now);

        log::debug!("Resumed at {now}");
        self.persist_snapshot();
        self.events.publish(TimerEvent::Resumed { at: now });
    }

    /// Finish the session, store it, and return to idle.
    ///
    /// Returns a copy of the completed session, or `None` when nothing was recording.
    pub fn stop_lecture(&mut self) -> Option<LectureSession> {
        self.current.as_ref()?;
        if self.timer.is_running {
            self.pause_lecture();
        }

        let now = self.clock.now_ms();
        self.close_open_interval(now);

        let mut session = self.current.take()?;
        session.completed_at = Some(now);
        // A stop straight from running leaves a zero-length trailing pause
        session.paused_intervals = self
            .timer
            .paused_intervals
            .iter()
            .copied()
            .filter(|interval| interval.end > interval.start)
            .collect();

        if !self.storage.save_session(&session) {
            log::warn!("Session {} was not persisted", session.id);
        }
        self.storage.clear_paused_state();
        self.timer = TimerState::default();
        self.checked.clear();

        log::info!(
            "Stopped session {} after {} ms active",
            session.id,
            session.active_duration().unwrap_or_default()
        );
        self.events.publish(TimerEvent::Stopped {
            session_id: session.id.clone(),
        });
        Some(session)
    }

    /// Record `item_id` as covered now, replacing any earlier timestamp for it.
    pub fn log_item_covered(&mut self, item_id: &str) {
        let Some(session) = self.current.as_mut() else {
            return;
        };

        let now = self.clock.now_ms();
        session.item_timestamps.retain(|entry| entry.item_id != item_id);
        session.item_timestamps.push(ItemTimestamp {
            item_id: item_id.to_string(),
            timestamp: now,
        });
        if !self.is_item_checked(item_id) {
            self.checked.push(item_id.to_string());
        }

        self.persist_snapshot();
        self.events.publish(TimerEvent::ItemCovered {
            item_id: item_id.to_string(),
            at: now,
        });
    }

    pub fn remove_item_timestamp(&mut self, item_id: &str) {
        let Some(session) = self.current.as_mut() else {
            return;
        };

        session.item_timestamps.retain(|entry| entry.item_id != item_id);
        self.checked.retain(|id| id != item_id);

        self.persist_snapshot();
        self.events.publish(TimerEvent::ItemUncovered {
            item_id: item_id.to_string(),
        });
    }

    /// Adopt the stored paused session, if any, while idle.
    ///
    /// A snapshot taken while running is restored as paused, with a new pause
    /// starting now.
    pub fn restore_paused_lecture(&mut self) -> bool {
        if self.current.is_some() {
            log::debug!("Not restoring: a session is already active");
            return false;
        }
        let Some(PausedLectureState {
            mut session,
            mut timer,
            checked_item_ids,
        }) = self.storage.load_paused_state()
        else {
            return false;
        };

        if timer.is_running {
            let interval = PausedInterval::open(self.clock.now_ms());
            timer.is_running = false;
            timer.paused_intervals.push(interval);
            session.paused_intervals.push(interval);
        }

        let session_id = session.id.clone();
        self.current = Some(session);
        self.timer = timer;
        self.checked = checked_item_ids;
        self.persist_snapshot();

        log::info!("Restored paused session {session_id}");
        self.events.publish(TimerEvent::Restored { session_id });
        true
    }

    pub fn load_paused_lecture_state(&self) -> Option<PausedLectureState> {
        self.storage.load_paused_state()
    }

    pub fn has_paused_lecture(&self) -> bool {
        self.storage.has_paused_state()
    }

    pub fn clear_paused_lecture(&self) -> bool {
        self.storage.clear_paused_state()
    }

    /// Active milliseconds since start, excluding paused time. Zero when idle.
    pub fn elapsed_time(&self) -> i64 {
        if self.current.is_none() {
            return 0;
        }
        self.timer.elapsed(self.clock.now_ms())
    }

    fn close_open_interval(&mut self, now: i64) {
        if let Some(interval) = self
            .timer
            .paused_intervals
            .iter_mut()
            .rev()
            .find(|interval| interval.is_open())
        {
            interval.end = now;
            self.timer.paused_time += now - interval.start;
        }

        if let Some(interval) = self
            .current
            .as_mut()
            .and_then(|session| session.paused_intervals.iter_mut().rev().find(|i| i.is_open()))
        {
            interval.end = now;
        }
    }

    fn persist_snapshot(&self) {
        let Some(session) = &self.current else {
            return;
        };
        let snapshot = PausedLectureState {
            session: session.clone(),
            timer: self.timer.clone(),
            checked_item_ids: self.checked.clone(),
        };
        if !self.storage.save_paused_state(&snapshot) {
            log::warn!("Session {} snapshot not persisted", session.id);
        }
    }
}
