//! The current / today / tomorrow bucketing.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use mauria_shared::Lesson;

use crate::instant::parse_instant;
use crate::title::{decode_title, LessonDetails};

/// A lesson shaped for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingLesson {
    pub id: String,
    #[serde(flatten)]
    pub details: LessonDetails,
    /// `"HH:mm - HH:mm"`.
    pub time_range: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// The derived view: the lesson in progress, the rest of today, and tomorrow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Upcoming {
    pub current: Option<UpcomingLesson>,
    pub today: Vec<UpcomingLesson>,
    pub tomorrow: Vec<UpcomingLesson>,
}

/// Classify `lessons` relative to `now`.
///
/// Only lessons starting on now's calendar day or the one immediately after
/// are retained.  `current` is the first retained lesson (in input order)
/// whose `[start, end]` interval contains `now` inclusively; `today` holds
/// same-day lessons starting strictly after `now`; `tomorrow` holds next-day
/// lessons.  Both buckets are sorted ascending by start.  Lessons with
/// unparsable timestamps are skipped.
pub fn derive_upcoming(now: DateTime<FixedOffset>, lessons: &[Lesson]) -> Upcoming {
    let today = now.date_naive();
    let Some(tomorrow) = today.succ_opt() else {
        return Upcoming::default();
    };

    let mut out = Upcoming::default();

    for lesson in lessons {
        let (start, end) = match (parse_instant(&lesson.start), parse_instant(&lesson.end)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                tracing::debug!(id = %lesson.id, "skipping lesson with unparsable timestamps");
                continue;
            }
        };

        let day = start.date_naive();
        if day != today && day != tomorrow {
            continue;
        }

        if out.current.is_none() && start <= now && now <= end {
            out.current = Some(display(lesson, start, end));
        }

        if day == today && start > now {
            out.today.push(display(lesson, start, end));
        } else if day == tomorrow {
            out.tomorrow.push(display(lesson, start, end));
        }
    }

    out.today.sort_by_key(|lesson| lesson.start);
    out.tomorrow.sort_by_key(|lesson| lesson.start);
    out
}

fn display(lesson: &Lesson, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> UpcomingLesson {
    UpcomingLesson {
        id: lesson.id.clone(),
        details: decode_title(&lesson.title, &lesson.class_name),
        time_range: format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, start: &str, end: &str) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: format!("B305\nCours {id}\nCM\nM. Durand"),
            start: start.to_string(),
            end: end.to_string(),
            all_day: false,
            editable: false,
            class_name: "est".to_string(),
        }
    }

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn current_today_and_tomorrow_are_bucketed() {
        let lessons = vec![
            lesson("a", "2025-09-23T09:00:00+02:00", "2025-09-23T10:00:00+02:00"),
            lesson("b", "2025-09-23T14:00:00+02:00", "2025-09-23T15:00:00+02:00"),
        ];
        let derived = derive_upcoming(at("2025-09-23T09:30:00+02:00"), &lessons);

        assert_eq!(derived.current.as_ref().unwrap().id, "a");
        assert_eq!(derived.today.len(), 1);
        assert_eq!(derived.today[0].id, "b");
        assert!(derived.tomorrow.is_empty());
    }

    #[test]
    fn interval_bounds_are_inclusive() {
        let lessons = vec![lesson(
            "a",
            "2025-09-23T09:00:00+02:00",
            "2025-09-23T10:00:00+02:00",
        )];

        let starting = derive_upcoming(at("2025-09-23T09:00:00+02:00"), &lessons);
        assert!(starting.current.is_some());

        let ending = derive_upcoming(at("2025-09-23T10:00:00+02:00"), &lessons);
        assert!(ending.current.is_some());
    }

    #[test]
    fn overlapping_lessons_pick_the_first_in_input_order() {
        let lessons = vec![
            lesson("b", "2025-09-23T09:15:00+02:00", "2025-09-23T10:00:00+02:00"),
            lesson("a", "2025-09-23T09:00:00+02:00", "2025-09-23T11:00:00+02:00"),
        ];
        let derived = derive_upcoming(at("2025-09-23T09:30:00+02:00"), &lessons);
        assert_eq!(derived.current.unwrap().id, "b");
    }

    #[test]
    fn tomorrow_is_sorted_and_later_days_are_dropped() {
        let lessons = vec![
            lesson("late", "2025-09-24T14:00:00+02:00", "2025-09-24T15:00:00+02:00"),
            lesson("early", "2025-09-24T08:00:00+02:00", "2025-09-24T09:00:00+02:00"),
            lesson("too-far", "2025-09-25T08:00:00+02:00", "2025-09-25T09:00:00+02:00"),
            lesson("past", "2025-09-22T08:00:00+02:00", "2025-09-22T09:00:00+02:00"),
        ];
        let derived = derive_upcoming(at("2025-09-23T12:00:00+02:00"), &lessons);

        assert!(derived.current.is_none());
        assert!(derived.today.is_empty());
        let ids: Vec<&str> = derived.tomorrow.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn colonless_offsets_are_accepted() {
        let lessons = vec![lesson(
            "a",
            "2025-09-23T09:00:00+0200",
            "2025-09-23T10:00:00+0200",
        )];
        let derived = derive_upcoming(at("2025-09-23T09:30:00+02:00"), &lessons);
        assert!(derived.current.is_some());
    }

    #[test]
    fn unparsable_timestamps_are_skipped_not_fatal() {
        let lessons = vec![
            lesson("bad", "n'importe quoi", "2025-09-23T10:00:00+02:00"),
            lesson("ok", "2025-09-23T14:00:00+02:00", "2025-09-23T15:00:00+02:00"),
        ];
        let derived = derive_upcoming(at("2025-09-23T09:30:00+02:00"), &lessons);
        assert_eq!(derived.today.len(), 1);
        assert_eq!(derived.today[0].id, "ok");
    }

    #[test]
    fn display_shape_carries_decoded_title_and_time_range() {
        let lessons = vec![lesson(
            "a",
            "2025-09-23T09:00:00+02:00",
            "2025-09-23T10:30:00+02:00",
        )];
        let derived = derive_upcoming(at("2025-09-23T09:30:00+02:00"), &lessons);

        let current = derived.current.unwrap();
        assert_eq!(current.details.location, "B305");
        assert_eq!(current.details.course_title, "Cours a");
        assert_eq!(current.details.teacher, "M. Durand");
        assert_eq!(current.time_range, "09:00 - 10:30");
    }

    #[test]
    fn derivation_is_deterministic() {
        let lessons = vec![
            lesson("a", "2025-09-23T09:00:00+02:00", "2025-09-23T10:00:00+02:00"),
            lesson("b", "2025-09-24T09:00:00+02:00", "2025-09-24T10:00:00+02:00"),
        ];
        let now = at("2025-09-23T09:30:00+02:00");
        assert_eq!(
            derive_upcoming(now, &lessons),
            derive_upcoming(now, &lessons)
        );
    }
}
