//! App catalogue used by the launch intent and the launcher panel.

use serde::Serialize;

/// A launchable application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppEntry {
    pub name: &'static str,
    pub category: &'static str,
    /// Android intent URL (or scheme) that opens the app.
    pub launch_url: &'static str,
}

/// Spoken keyword → app name. Order matters: the first keyword contained in
/// the command wins.
const APP_KEYWORDS: &[(&str, &str)] = &[
    ("camera", "Camera"),
    ("gallery", "Gallery"),
    ("photos", "Gallery"),
    ("settings", "Settings"),
    ("browser", "Browser"),
    ("chrome", "Browser"),
    ("maps", "Maps"),
    ("phone", "Phone"),
    ("messages", "Messages"),
    ("music", "Music"),
    ("calculator", "Calculator"),
    ("files", "Files"),
    ("calendar", "Calendar"),
    ("clock", "Clock"),
];

pub const APP_CATALOGUE: &[AppEntry] = &[
    AppEntry {
        name: "Camera",
        category: "Media",
        launch_url: "intent://com.android.camera#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Gallery",
        category: "Media",
        launch_url: "intent://com.android.gallery3d#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Settings",
        category: "System",
        launch_url: "intent://com.android.settings#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Browser",
        category: "Internet",
        launch_url: "intent://com.android.browser#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Maps",
        category: "Navigation",
        launch_url: "intent://com.google.android.apps.maps#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Phone",
        category: "Communication",
        launch_url: "tel:",
    },
    AppEntry {
        name: "Messages",
        category: "Communication",
        launch_url: "sms:",
    },
    AppEntry {
        name: "Music",
        category: "Media",
        launch_url: "intent://com.android.music#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Calculator",
        category: "Utilities",
        launch_url: "intent://com.android.calculator2#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Files",
        category: "Utilities",
        launch_url: "intent://com.android.documentsui#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Calendar",
        category: "Productivity",
        launch_url: "intent://com.android.calendar#Intent;scheme=android-app;end",
    },
    AppEntry {
        name: "Clock",
        category: "Utilities",
        launch_url: "intent://com.android.deskclock#Intent;scheme=android-app;end",
    },
];

/// Returns the app named in a lower-cased command, if any.
pub fn extract_app_name(command: &str) -> Option<&'static str> {
    APP_KEYWORDS
        .iter()
        .find(|(keyword, _)| command.contains(keyword))
        .map(|(_, name)| *name)
}

/// Case-insensitive catalogue lookup.
pub fn find_app(name: &str) -> Option<&'static AppEntry> {
    APP_CATALOGUE
        .iter()
        .find(|app| app.name.eq_ignore_ascii_case(name.trim()))
}

const MAX_RECENT_APPS: usize = 4;

/// Recently launched apps, newest first, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct RecentApps {
    names: Vec<String>,
}

impl RecentApps {
    pub fn record(&mut self, name: &str) {
        self.names.retain(|existing| existing != name);
        self.names.insert(0, name.to_string());
        self.names.truncate(MAX_RECENT_APPS);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_keyword_wins() {
        // table order decides, not the position inside the command
        assert_eq!(extract_app_name("open photos from camera"), Some("Camera"));
        assert_eq!(extract_app_name("open my photos"), Some("Gallery"));
        assert_eq!(extract_app_name("launch chrome"), Some("Browser"));
        assert_eq!(extract_app_name("open the door"), None);
    }

    #[test]
    fn test_recent_apps_dedup_and_cap() {
        let mut recent = RecentApps::default();
        for name in ["Camera", "Maps", "Music", "Clock", "Files"] {
            recent.record(name);
        }
        recent.record("Music");

        assert_eq!(recent.names(), &["Music", "Files", "Clock", "Maps"]);
    }

    #[test]
    fn test_find_app_ignores_case() {
        assert_eq!(find_app("camera").map(|a| a.category), Some("Media"));
        assert!(find_app("Teleporter").is_none());
    }
}
