//! # mauria-planning
//!
//! Pure derivations over the lesson list: timestamp normalization, the
//! positional title decoding heuristic, and the current / rest-of-today /
//! tomorrow bucketing shown on the home page.  No I/O, no mutation; same
//! inputs (including "now") always yield the same output.

pub mod instant;
pub mod title;
pub mod upcoming;

pub use instant::{normalize_offset, parse_instant};
pub use title::{decode_title, LessonDetails};
pub use upcoming::{derive_upcoming, Upcoming, UpcomingLesson};
