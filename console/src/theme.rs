//! Theme resolution and marker application.
//!
//! The dark "glass" look is the baseline and carries no marker. Light and
//! dark-without-glass each add one CSS class to every marker target.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::platform::{Platform, PlatformQuery};
use crate::settings::{Settings, Theme};

pub const LIGHT_CSS: &str = "light-theme";
pub const DARK_NO_GLASS_CSS: &str = "dark-theme-no-glass";
pub const CSS_THEMES: [&str; 2] = [LIGHT_CSS, DARK_NO_GLASS_CSS];

/// Theme actually rendered after platform and system preference are taken
/// into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayTheme {
    Dark,
    DarkNoGlass,
    Light,
}

impl DisplayTheme {
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Dark => None,
            Self::DarkNoGlass => Some(DARK_NO_GLASS_CSS),
            Self::Light => Some(LIGHT_CSS),
        }
    }

    /// Glass is only rendered on macOS.
    fn dark_for(platform: Platform) -> Self {
        match platform {
            Platform::MacOS => Self::Dark,
            Platform::Other => Self::DarkNoGlass,
        }
    }
}

/// Resolve the theme to render. The platform is queried once per call.
pub async fn resolve_theme(theme: Theme, platform: &dyn PlatformQuery) -> DisplayTheme {
    let host = platform.platform().await;
    match theme {
        Theme::Dark => DisplayTheme::dark_for(host),
        Theme::DarkNoGlass => DisplayTheme::DarkNoGlass,
        Theme::Light => DisplayTheme::Light,
        Theme::Auto => {
            if platform.system_theme_is_dark().await {
                DisplayTheme::dark_for(host)
            } else {
                DisplayTheme::Light
            }
        }
    }
}

/// Something that carries theme classes (document body, overlay container).
pub trait ThemeTarget: Send + Sync {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// In-memory class list, used as the headless marker target.
#[derive(Debug, Default)]
pub struct ClassList {
    classes: Mutex<BTreeSet<String>>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lock().contains(class)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.classes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ThemeTarget for ClassList {
    fn add_class(&self, class: &str) {
        self.lock().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.lock().remove(class);
    }
}

/// Applies resolved themes to a fixed set of targets.
pub struct ThemeResolver {
    targets: Vec<Arc<dyn ThemeTarget>>,
    applied: Mutex<Option<DisplayTheme>>,
}

impl ThemeResolver {
    pub fn new(targets: Vec<Arc<dyn ThemeTarget>>) -> Self {
        Self {
            targets,
            applied: Mutex::new(None),
        }
    }

    /// Resolve `settings` against the host and apply the result.
    pub async fn refresh(&self, settings: &Settings, platform: &dyn PlatformQuery) -> DisplayTheme {
        tracing::info!(theme = %settings.theme, "Set theme");
        let resolved = resolve_theme(settings.theme, platform).await;
        self.apply(resolved);
        resolved
    }

    /// Clear every known marker, then add the one for `theme`.
    pub fn apply(&self, theme: DisplayTheme) {
        self.clear();
        if let Some(marker) = theme.marker() {
            for target in &self.targets {
                target.add_class(marker);
            }
        }
        *self.applied.lock().unwrap_or_else(|e| e.into_inner()) = Some(theme);
        tracing::debug!(?theme, "Theme applied");
    }

    pub fn applied(&self) -> Option<DisplayTheme> {
        *self.applied.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear(&self) {
        for class in CSS_THEMES {
            for target in &self.targets {
                target.remove_class(class);
            }
        }
    }
}
