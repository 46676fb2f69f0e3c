use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lesson as delivered by the portal backend.
///
/// `start` and `end` are kept in their wire form (RFC 3339, sometimes with a
/// colonless numeric offset such as `+0200`).  The `title` field is a
/// newline-joined positional encoding of location, course title, lesson kind
/// and teacher; see `mauria-planning` for the decoding heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub editable: bool,
    pub class_name: String,
}

/// A personal calendar entry created on the device.
///
/// Owned exclusively by the device and never sent to the server.  Shares the
/// lesson shape so the planner can render both kinds side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvent {
    pub id: Uuid,
    pub title: String,
    /// RFC 3339 datetime.
    pub start: String,
    /// RFC 3339 datetime.
    pub end: String,
    pub all_day: bool,
    pub editable: bool,
    pub class_name: String,
}

/// A to-do entry created on the device, never server-synced.
///
/// The persisted form stores `date` as an RFC 3339 string; round-tripping
/// through storage preserves the instant, not any particular local rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Short user-facing label.
    pub task: String,
    pub date: DateTime<Utc>,
}

/// Portal credentials.  Present iff both keys exist in the store; absence of
/// either means "logged out".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub password: String,
}

/// UI color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Oled,
    Cherry,
    Pride,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Oled => "oled",
            Theme::Cherry => "cherry",
            Theme::Pride => "pride",
        }
    }

    /// Parse a stored value, substituting the default for anything
    /// unrecognized.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            "oled" => Theme::Oled,
            "cherry" => Theme::Cherry,
            "pride" => Theme::Pride,
            _ => Theme::default(),
        }
    }
}

/// Animated page background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Particles,
    Grid,
}

impl Background {
    pub fn as_str(self) -> &'static str {
        match self {
            Background::Particles => "particles",
            Background::Grid => "grid",
        }
    }

    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "particles" => Background::Particles,
            "grid" => Background::Grid,
            _ => Background::default(),
        }
    }
}

/// Text size preference, mapped to a numeric display scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Petit,
    #[default]
    Moyen,
    Grand,
}

impl TextSize {
    pub fn as_str(self) -> &'static str {
        match self {
            TextSize::Petit => "petit",
            TextSize::Moyen => "moyen",
            TextSize::Grand => "grand",
        }
    }

    /// Scale factor applied to the root font size.
    pub fn scale(self) -> f32 {
        match self {
            TextSize::Petit => 0.9,
            TextSize::Moyen => 1.0,
            TextSize::Grand => 1.15,
        }
    }

    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "petit" => TextSize::Petit,
            "moyen" => TextSize::Moyen,
            "grand" => TextSize::Grand,
            _ => TextSize::default(),
        }
    }
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::FrFr => "fr-FR",
            Locale::EnUs => "en-US",
            Locale::EsEs => "es-ES",
        }
    }

    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "fr-FR" => Locale::FrFr,
            "en-US" => Locale::EnUs,
            "es-ES" => Locale::EsEs,
            _ => Locale::default(),
        }
    }
}
