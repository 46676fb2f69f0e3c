//! Preference accessors.
//!
//! Each accessor validates on read against its closed enum and substitutes
//! the documented default for any absent or unrecognized stored value.  Sets
//! persist immediately.

use mauria_shared::{Background, Locale, TextSize, Theme};

use crate::store::Store;

pub const THEME_KEY: &str = "theme";
pub const BACKGROUND_KEY: &str = "background";
pub const SCALE_KEY: &str = "mauria-scale";
pub const LOCALE_KEY: &str = "mauria-locale";
pub const FIRST_LAUNCH_KEY: &str = "firstLaunch";
pub const LAST_SEEN_UPDATE_KEY: &str = "lastSeenUpdate";

impl Store {
    pub fn theme(&self) -> Theme {
        self.read(THEME_KEY)
            .map(|raw| Theme::parse_or_default(&raw))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write(THEME_KEY, theme.as_str());
    }

    pub fn background(&self) -> Background {
        self.read(BACKGROUND_KEY)
            .map(|raw| Background::parse_or_default(&raw))
            .unwrap_or_default()
    }

    pub fn set_background(&self, background: Background) {
        self.write(BACKGROUND_KEY, background.as_str());
    }

    pub fn text_size(&self) -> TextSize {
        self.read(SCALE_KEY)
            .map(|raw| TextSize::parse_or_default(&raw))
            .unwrap_or_default()
    }

    pub fn set_text_size(&self, size: TextSize) {
        self.write(SCALE_KEY, size.as_str());
    }

    pub fn locale(&self) -> Locale {
        self.read(LOCALE_KEY)
            .map(|raw| Locale::parse_or_default(&raw))
            .unwrap_or_default()
    }

    pub fn set_locale(&self, locale: Locale) {
        self.write(LOCALE_KEY, locale.as_str());
    }

    /// Whether this is the very first launch on this device.  True until
    /// [`mark_launched`](Store::mark_launched) runs.
    pub fn first_launch(&self) -> bool {
        self.read(FIRST_LAUNCH_KEY).is_none()
    }

    pub fn mark_launched(&self) {
        self.write(FIRST_LAUNCH_KEY, "false");
    }

    /// Version string of the last changelog the user has seen.
    pub fn last_seen_update(&self) -> Option<String> {
        self.read(LAST_SEEN_UPDATE_KEY)
    }

    pub fn set_last_seen_update(&self, version: &str) {
        self.write(LAST_SEEN_UPDATE_KEY, version);
    }
}
