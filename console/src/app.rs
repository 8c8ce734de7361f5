use std::sync::Arc;

use console_events::EventSource;

use crate::alerts::{AlertSettings, Presenter, SystemNotifier};
use crate::navigation::Navigator;
use crate::platform::PlatformQuery;
use crate::router::{StreamRouter, SubscriptionSet};
use crate::settings::SettingsStore;
use crate::theme::ThemeResolver;
use crate::window::WindowContext;

/// External services the console talks to.
#[derive(Clone)]
pub struct ConsoleServices {
    pub events: Arc<dyn EventSource>,
    pub settings: Arc<dyn SettingsStore>,
    pub platform: Arc<dyn PlatformQuery>,
    pub presenter: Arc<dyn Presenter>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn SystemNotifier>,
}

/// Everything one console window owns between init and teardown.
pub struct ConsoleContext {
    pub(crate) services: ConsoleServices,
    pub(crate) window: WindowContext,
    pub(crate) alert_settings: AlertSettings,
    pub(crate) theme: Arc<ThemeResolver>,
    pub(crate) router: StreamRouter,
    pub(crate) settings_watch: SubscriptionSet,
}

impl ConsoleContext {
    pub fn new(
        services: ConsoleServices,
        window: WindowContext,
        alert_settings: AlertSettings,
        theme: ThemeResolver,
    ) -> Self {
        let router = StreamRouter::new(services.events.clone());
        Self {
            services,
            window,
            alert_settings,
            theme: Arc::new(theme),
            router,
            settings_watch: SubscriptionSet::new(),
        }
    }

    pub fn window(&self) -> WindowContext {
        self.window
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    /// Wait for every subscription released by teardown to finish.
    pub async fn join_released(&mut self) -> usize {
        self.router.join_released().await + self.settings_watch.join_released().await
    }

    /// Number of live subscriptions (event routes plus settings watchers).
    pub fn active_subscriptions(&self) -> usize {
        self.router.active() + self.settings_watch.len()
    }
}
