//! In-app navigation with browser-style history.

use std::sync::Mutex;

/// Navigation service used by alert continuations and menu commands.
pub trait Navigator: Send + Sync {
    fn navigate(&self, segments: &[String]);
    fn back(&self);
    fn forward(&self);
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    cursor: usize,
}

/// Linear history: navigating drops any forward entries.
#[derive(Debug)]
pub struct History {
    state: Mutex<HistoryState>,
}

impl History {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec!["/".to_string()],
                cursor: 0,
            }),
        }
    }

    pub fn current(&self) -> String {
        let state = self.lock();
        state.entries[state.cursor].clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.lock().cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let state = self.lock();
        state.cursor + 1 < state.entries.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

pub fn route_path(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

impl Navigator for History {
    fn navigate(&self, segments: &[String]) {
        let route = route_path(segments);
        let mut state = self.lock();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(route.clone());
        state.cursor = state.entries.len() - 1;
        tracing::info!(%route, "Navigated");
    }

    fn back(&self) {
        let mut state = self.lock();
        if state.cursor == 0 {
            tracing::debug!("History back at first entry");
            return;
        }
        state.cursor -= 1;
        tracing::debug!(route = %state.entries[state.cursor], "History back");
    }

    fn forward(&self) {
        let mut state = self.lock();
        if state.cursor + 1 >= state.entries.len() {
            tracing::debug!("History forward at last entry");
            return;
        }
        state.cursor += 1;
        tracing::debug!(route = %state.entries[state.cursor], "History forward");
    }
}
