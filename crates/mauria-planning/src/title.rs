//! The lesson title decoding heuristic.
//!
//! The portal transports four structured fields as one newline-joined string:
//! location, course title, lesson kind, teacher -- in that order, with no
//! delimiter escaping.  Decoding is positional and lossy by design; a
//! structured upstream format would be better, but downstream display depends
//! on these positional semantics.

use serde::Serialize;

/// Structured fields recovered from a lesson title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDetails {
    pub location: String,
    pub course_title: String,
    pub kind: String,
    pub teacher: String,
}

/// Decode a newline-joined title.  Missing lines degrade gracefully: the
/// course title falls back to the raw class/category field, everything else
/// to the empty string.  Never fails.
pub fn decode_title(title: &str, class_name: &str) -> LessonDetails {
    let mut lines = title.lines().map(str::trim);

    let location = lines.next().unwrap_or("").to_string();
    let course_title = lines
        .next()
        .filter(|line| !line.is_empty())
        .unwrap_or(class_name)
        .to_string();
    let kind = lines.next().unwrap_or("").to_string();
    let teacher = lines.next().unwrap_or("").to_string();

    LessonDetails {
        location,
        course_title,
        kind,
        teacher,
    }
}
