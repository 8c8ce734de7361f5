//! Recording doubles for the console's external services.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::alerts::{AlertId, AlertRequest, Continuation, DialogId, NotifyError, Presenter, SystemNotifier};
use crate::navigation::Navigator;
use crate::platform::{Platform, PlatformQuery};
use crate::settings::{Settings, SettingsStore};

#[derive(Default)]
pub struct RecordingPresenter {
    alerts: Mutex<Vec<(AlertId, AlertRequest)>>,
    dialogs: Mutex<Vec<DialogId>>,
}

impl RecordingPresenter {
    pub fn messages(&self) -> Vec<String> {
        self.alerts.lock().unwrap().iter().map(|(_, r)| r.message.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    /// Inspect the alert at `index`.
    pub fn with_alert<R>(&self, index: usize, f: impl FnOnce(&AlertRequest) -> R) -> R {
        f(&self.alerts.lock().unwrap()[index].1)
    }

    pub fn take_continuation(&self, index: usize) -> Option<Continuation> {
        self.alerts.lock().unwrap()[index].1.on_action.take()
    }

    pub fn dialogs(&self) -> Vec<DialogId> {
        self.dialogs.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show_alert(&self, request: AlertRequest) -> AlertId {
        let id = AlertId::new();
        self.alerts.lock().unwrap().push((id, request));
        id
    }

    fn show_dialog(&self, dialog: DialogId) {
        self.dialogs.lock().unwrap().push(dialog);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Vec<String>>>,
    pub backs: AtomicUsize,
    pub forwards: AtomicUsize,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Vec<String>> {
        self.routes.lock().unwrap().clone()
    }

    pub fn backs(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }

    pub fn forwards(&self) -> usize {
        self.forwards.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, segments: &[String]) {
        self.routes.lock().unwrap().push(segments.to_vec());
    }

    fn back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }

    fn forward(&self) {
        self.forwards.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl SystemNotifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Spawn(std::io::Error::other("no notifier")));
        }
        self.sent.lock().unwrap().push((title.into(), body.into()));
        Ok(())
    }
}

pub struct FixedPlatform {
    pub platform: Platform,
    pub dark: bool,
}

#[async_trait]
impl PlatformQuery for FixedPlatform {
    async fn platform(&self) -> Platform {
        self.platform
    }

    async fn system_theme_is_dark(&self) -> bool {
        self.dark
    }
}

pub struct MemorySettingsStore {
    current: Mutex<Settings>,
    changes: broadcast::Sender<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            current: Mutex::new(settings),
            changes,
        }
    }

    pub fn set(&self, settings: Settings) {
        *self.current.lock().unwrap() = settings;
        let _ = self.changes.send(settings);
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_settings(&self) -> Result<Settings, anyhow::Error> {
        Ok(*self.current.lock().unwrap())
    }

    fn settings_changed(&self) -> broadcast::Receiver<Settings> {
        self.changes.subscribe()
    }
}
