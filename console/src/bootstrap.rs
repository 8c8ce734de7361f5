use std::path::PathBuf;
use std::sync::Arc;

use console_db::Database;
use console_events::EventHub;

use crate::alerts::{AlertQueue, AlertSettings, DesktopNotifier};
use crate::app::{ConsoleContext, ConsoleServices};
use crate::config::{AppConfig, SettingsManager};
use crate::navigation::History;
use crate::platform::HostPlatform;
use crate::settings::DbSettingsStore;
use crate::theme::{ClassList, ThemeResolver, ThemeTarget};
use crate::window::WindowContext;

/// Foundation init: env, data dir, database, settings (fatal on error).
pub fn init_foundation() -> Result<(Database, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let db_path = dir.join("console.db");
    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let sm = SettingsManager::new(db.clone());
    match sm.migrate_from_env() {
        Ok(0) => {}
        Ok(migrated) => tracing::info!(migrated, "Migrated settings from environment"),
        Err(e) => tracing::error!("Failed to migrate from env: {e}"),
    }
    sm.initialize_defaults()?;

    let config = AppConfig::load(&sm)?;
    tracing::info!(
        mode = ?config.alert_display_mode,
        duration_secs = config.alert_duration_seconds,
        "Settings loaded"
    );
    Ok((db, config, dir))
}

/// A fully wired console window and the concrete services behind it.
pub struct Console {
    pub ctx: ConsoleContext,
    pub hub: EventHub,
    pub queue: Arc<AlertQueue>,
    pub history: Arc<History>,
    pub settings: Arc<DbSettingsStore>,
    pub body: Arc<ClassList>,
    pub overlay: Arc<ClassList>,
}

/// Wire the host services into a console context. Must run inside a
/// tokio runtime since the alert worker is spawned here.
pub fn build_console(db: Database, config: &AppConfig) -> Console {
    let hub = EventHub::new();
    let queue = Arc::new(AlertQueue::start(config.alert_display_mode));
    let history = Arc::new(History::new());
    let settings = Arc::new(DbSettingsStore::new(SettingsManager::new(db)));
    let body = Arc::new(ClassList::new());
    let overlay = Arc::new(ClassList::new());

    let services = ConsoleServices {
        events: Arc::new(hub.clone()),
        settings: settings.clone(),
        platform: Arc::new(HostPlatform::new(config.system_theme_override)),
        presenter: queue.clone(),
        navigator: history.clone(),
        notifier: Arc::new(DesktopNotifier::new(config.system_notifications_enabled)),
    };
    let window = WindowContext::from_origin(&config.window_origin, &config.main_window_origin);
    let alert_settings = AlertSettings {
        duration: config.alert_duration(),
        notification_title: config.notification_title.clone(),
    };
    let resolver = ThemeResolver::new(vec![
        body.clone() as Arc<dyn ThemeTarget>,
        overlay.clone() as Arc<dyn ThemeTarget>,
    ]);

    tracing::info!(?window, "Console window created");
    Console {
        ctx: ConsoleContext::new(services, window, alert_settings, resolver),
        hub,
        queue,
        history,
        settings,
        body,
        overlay,
    }
}

/// Determine the data directory for the application.
/// Priority: CONSOLE_DATA_DIR env var > ~/.operator-console
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONSOLE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".operator-console")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
