//! Console lifecycle: theme on init, alert routes in the main window,
//! everything released on teardown.

use std::sync::Arc;

use console_events::{Category, Event, EventKind, MenuButton};
use tokio::sync::broadcast;

use crate::alerts::handlers::PlayerAction;
use crate::alerts::{AlertHandlers, DialogId};
use crate::app::ConsoleContext;
use crate::settings::Settings;

/// Start the console: apply the persisted theme, follow settings changes
/// and, in the main window only, route events to alerts.
pub async fn on_init(ctx: &mut ConsoleContext) {
    if ctx.active_subscriptions() > 0 {
        tracing::warn!("Console already initialized");
        return;
    }

    // Subscribe before the first read so no change slips between the two.
    let changes = ctx.services.settings.settings_changed();
    fetch_settings(ctx).await;
    watch_settings(ctx, changes);

    if ctx.window.is_main() {
        init_alerts(ctx);
    } else {
        tracing::info!("Secondary window, alerts disabled");
    }

    tracing::info!(
        subscriptions = ctx.active_subscriptions(),
        "Console initialized"
    );
}

/// Release every subscription. Safe to call repeatedly or without init.
pub fn on_teardown(ctx: &mut ConsoleContext) -> usize {
    let released = ctx.router.unsubscribe_all() + ctx.settings_watch.cancel_all();
    tracing::info!(released, "Console torn down");
    released
}

async fn fetch_settings(ctx: &ConsoleContext) {
    match ctx.services.settings.get_settings().await {
        Ok(settings) => {
            ctx.theme
                .refresh(&settings, ctx.services.platform.as_ref())
                .await;
        }
        Err(e) => tracing::warn!("Failed to read settings, keeping current theme: {e}"),
    }
}

fn watch_settings(ctx: &mut ConsoleContext, mut changes: broadcast::Receiver<Settings>) {
    let theme = ctx.theme.clone();
    let platform = ctx.services.platform.clone();

    ctx.settings_watch.spawn("settings", move |token| async move {
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                next = changes.recv() => next,
            };
            match next {
                Ok(settings) => {
                    theme.refresh(&settings, platform.as_ref()).await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Settings watcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("Settings watcher stopped");
    });
}

fn init_alerts(ctx: &mut ConsoleContext) {
    let services = &ctx.services;
    let handlers = Arc::new(AlertHandlers::new(
        services.presenter.clone(),
        services.navigator.clone(),
        services.notifier.clone(),
        ctx.alert_settings.clone(),
    ));
    let navigator = services.navigator.clone();
    let presenter = services.presenter.clone();
    let router = &mut ctx.router;

    let h = handlers.clone();
    router.subscribe(Category::Sessions, |_| true, move |event| {
        let Some(server) = event.as_server() else {
            return;
        };
        match server.kind {
            EventKind::SessionConnected => {
                h.session_connected(server.session.as_ref());
            }
            EventKind::SessionDisconnected => {
                h.session_disconnected(server.session.as_ref());
            }
            _ => tracing::trace!(event_type = server.kind.as_str(), "Session event ignored"),
        }
    });

    let h = handlers.clone();
    router.subscribe(Category::Players, |_| true, move |event| {
        let Some(server) = event.as_server() else {
            return;
        };
        match server.kind {
            EventKind::ClientJoined => {
                h.player(PlayerAction::Joined, server.client.as_ref());
            }
            EventKind::ClientLeft => {
                h.player(PlayerAction::Left, server.client.as_ref());
            }
            _ => tracing::trace!(event_type = server.kind.as_str(), "Player event ignored"),
        }
    });

    let h = handlers.clone();
    router.subscribe(Category::Jobs, |_| true, move |event| {
        let Some(server) = event.as_server() else {
            return;
        };
        match server.kind {
            EventKind::JobStopped => {
                h.job_stopped(server.job.as_ref());
            }
            _ => tracing::trace!(event_type = server.kind.as_str(), "Job event ignored"),
        }
    });

    let h = handlers;
    router.subscribe(Category::Notifications, |_| true, move |event| {
        if let Some(notification) = event.as_notification() {
            h.notification(notification);
        }
    });

    let nav = navigator.clone();
    router.subscribe(Category::Menu, menu_button(MenuButton::Back), move |_| {
        nav.back();
    });

    let nav = navigator;
    router.subscribe(Category::Menu, menu_button(MenuButton::Forward), move |_| {
        nav.forward();
    });

    router.subscribe(Category::Menu, menu_button(MenuButton::About), move |_| {
        presenter.show_dialog(DialogId::About);
    });
}

fn menu_button(button: MenuButton) -> impl Fn(&Event) -> bool + Send + 'static {
    move |event| event.as_menu().is_some_and(|menu| menu.button == button)
}
