//! The user-created calendar event collection.
//!
//! Events live as one JSON array under a single key, read-modify-written on
//! every operation.  Insertion order is creation order and no id dedup is
//! enforced.

use chrono::DateTime;
use uuid::Uuid;

use mauria_shared::UserEvent;

use crate::store::Store;

/// Storage key holding the serialized event collection.
pub const EVENTS_KEY: &str = "userEvents";

/// Re-render an RFC 3339 datetime in canonical form.  Idempotent; strings
/// that do not parse are kept as-is rather than dropped.
fn normalize_iso(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|_| raw.to_string())
}

impl Store {
    /// Append an event, normalizing its dates to RFC 3339 on write.
    pub fn add_event(&self, event: &UserEvent) {
        let mut events = self.list_events();
        let mut event = event.clone();
        event.start = normalize_iso(&event.start);
        event.end = normalize_iso(&event.end);
        events.push(event);
        self.write_events(&events);
    }

    /// All events in creation order.  An unparsable stored blob reads as an
    /// empty collection.
    pub fn list_events(&self) -> Vec<UserEvent> {
        let Some(raw) = self.read(EVENTS_KEY) else {
            return Vec::new();
        };

        let mut events: Vec<UserEvent> = serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored events unreadable, treating as empty");
            Vec::new()
        });

        for event in &mut events {
            event.start = normalize_iso(&event.start);
            event.end = normalize_iso(&event.end);
        }
        events
    }

    /// Remove the event with the given id.  Unknown ids are a silent no-op.
    pub fn remove_event(&self, id: Uuid) {
        let events: Vec<UserEvent> = self
            .list_events()
            .into_iter()
            .filter(|event| event.id != id)
            .collect();
        self.write_events(&events);
    }

    fn write_events(&self, events: &[UserEvent]) {
        match serde_json::to_string(events) {
            Ok(raw) => self.write(EVENTS_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "failed to serialize events"),
        }
    }
}
