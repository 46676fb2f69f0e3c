//! Application state handed to the (out-of-scope) rendering layer.

use chrono::{DateTime, FixedOffset};

use mauria_planning::{derive_upcoming, Upcoming};
use mauria_shared::{Lesson, UserEvent};
use mauria_store::Store;
use mauria_sync::BootstrapOutcome;

/// Everything the pages need once rendering is unblocked.
pub struct AppState {
    /// Handle to the on-device store.  All session, preference and
    /// user-content reads go through it.
    pub store: Store,

    /// How the bootstrap handshake ended.  A degraded outcome means pages
    /// run on whatever was cached by previous sessions.
    pub bootstrap: BootstrapOutcome,
}

impl AppState {
    /// Whether the app has usable credentials.
    pub fn logged_in(&self) -> bool {
        self.store.session().is_some()
    }

    /// Derive the home-page view from the remote lesson list merged with the
    /// user's own calendar events.
    pub fn upcoming(&self, now: DateTime<FixedOffset>, remote: &[Lesson]) -> Upcoming {
        let mut lessons = remote.to_vec();
        lessons.extend(self.store.list_events().iter().map(event_as_lesson));
        derive_upcoming(now, &lessons)
    }
}

/// Project a user event into the lesson shape the deriver consumes.
fn event_as_lesson(event: &UserEvent) -> Lesson {
    Lesson {
        id: event.id.to_string(),
        title: event.title.clone(),
        start: event.start.clone(),
        end: event.end.clone(),
        all_day: event.all_day,
        editable: event.editable,
        class_name: event.class_name.clone(),
    }
}
