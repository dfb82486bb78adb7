use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, load, save};
use crate::models::{LectureSession, Outline, PausedLectureState};

pub const USER_OUTLINES_KEY: &str = "user_outlines";
pub const LECTURE_SESSIONS_KEY: &str = "lecture_sessions";
pub const PAUSED_SESSION_KEY: &str = "lecture_current_session";

/// Typed access to outlines, completed sessions and the paused-session slot.
///
/// Store failures are logged and reported as `false` or empty results.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match load(&self.store, key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to load {key}: {e}");
                T::default()
            }
        }
    }

    /// Current list under `key` for a read-modify-write.
    ///
    /// `None` when the stored value cannot be read, so callers never write
    /// over data they failed to load.
    fn load_for_update<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        match load(&self.store, key) {
            Ok(values) => Some(values.unwrap_or_default()),
            Err(e) => {
                log::warn!("Not updating {key}, existing value unreadable: {e}");
                None
            }
        }
    }

    fn save_logged<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match save(&self.store, key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save {key}: {e}");
                false
            }
        }
    }

    pub fn outlines(&self) -> Vec<Outline> {
        self.load_or_default(USER_OUTLINES_KEY)
    }

    pub fn outline(&self, id: &str) -> Option<Outline> {
        self.outlines().into_iter().find(|outline| outline.id == id)
    }

    /// Insert or replace an outline by id.
    pub fn save_outline(&self, outline: &Outline) -> bool {
        let Some(mut outlines) = self.load_for_update::<Outline>(USER_OUTLINES_KEY) else {
            return false;
        };
        upsert(&mut outlines, outline.clone(), |o| o.id == outline.id);
        self.save_logged(USER_OUTLINES_KEY, &outlines)
    }

    pub fn delete_outline(&self, id: &str) -> bool {
        let Some(mut outlines) = self.load_for_update::<Outline>(USER_OUTLINES_KEY) else {
            return false;
        };
        outlines.retain(|outline| outline.id != id);
        self.save_logged(USER_OUTLINES_KEY, &outlines)
    }

    pub fn sessions(&self) -> Vec<LectureSession> {
        self.load_or_default(LECTURE_SESSIONS_KEY)
    }

    pub fn session(&self, id: &str) -> Option<LectureSession> {
        self.sessions().into_iter().find(|session| session.id == id)
    }

    pub fn sessions_for_outline(&self, outline_id: &str) -> Vec<LectureSession> {
        self.sessions()
            .into_iter()
            .filter(|session| session.outline_id == outline_id)
            .collect()
    }

    /// Insert or replace a session by id.
    pub fn save_session(&self, session: &LectureSession) -> bool {
        let Some(mut sessions) = self.load_for_update::<LectureSession>(LECTURE_SESSIONS_KEY)
        else {
            return false;
        };
        upsert(&mut sessions, session.clone(), |s| s.id == session.id);
        self.save_logged(LECTURE_SESSIONS_KEY, &sessions)
    }

    pub fn load_paused_state(&self) -> Option<PausedLectureState> {
        self.load_or_default(PAUSED_SESSION_KEY)
    }

    pub fn has_paused_state(&self) -> bool {
        self.load_paused_state().is_some()
    }

    pub fn save_paused_state(&self, state: &PausedLectureState) -> bool {
        self.save_logged(PAUSED_SESSION_KEY, state)
    }

    pub fn clear_paused_state(&self) -> bool {
        match self.store.remove(PAUSED_SESSION_KEY) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to clear paused session: {e}");
                false
            }
        }
    }
}

fn upsert<T>(values: &mut Vec<T>, value: T, matches: impl Fn(&T) -> bool) {
    match values.iter().position(matches) {
        Some(index) => values[index] = value,
        None => values.push(value),
    }
}
