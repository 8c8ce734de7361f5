//! Window context: only the primary window raises alerts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowContext {
    Main,
    Secondary,
}

impl WindowContext {
    /// Every window of the application shares the event feed; matching on
    /// origin keeps alerts from being raised once per window.
    pub fn from_origin(origin: &str, main_origin: &str) -> Self {
        if origin.trim_end_matches('/') == main_origin.trim_end_matches('/') {
            Self::Main
        } else {
            Self::Secondary
        }
    }

    pub fn is_main(self) -> bool {
        self == Self::Main
    }
}
