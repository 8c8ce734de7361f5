//! Host platform queries used by theme resolution.

use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOS
        } else {
            Self::Other
        }
    }
}

#[async_trait]
pub trait PlatformQuery: Send + Sync {
    async fn platform(&self) -> Platform;

    async fn system_theme_is_dark(&self) -> bool;
}

/// Queries the machine the console runs on.
///
/// The dark preference can be pinned through `SYSTEM_THEME`; otherwise it is
/// read from the desktop environment and treated as light when unknown.
pub struct HostPlatform {
    dark_override: Option<bool>,
}

impl HostPlatform {
    pub fn new(dark_override: Option<bool>) -> Self {
        Self { dark_override }
    }
}

#[async_trait]
impl PlatformQuery for HostPlatform {
    async fn platform(&self) -> Platform {
        Platform::current()
    }

    async fn system_theme_is_dark(&self) -> bool {
        if let Some(dark) = self.dark_override {
            return dark;
        }
        match Platform::current() {
            Platform::MacOS => {
                read_command("defaults", &["read", "-g", "AppleInterfaceStyle"])
                    .await
                    .is_some_and(|out| out.trim().eq_ignore_ascii_case("dark"))
            }
            Platform::Other => read_command(
                "gsettings",
                &["get", "org.gnome.desktop.interface", "color-scheme"],
            )
            .await
            .is_some_and(|out| out.contains("dark")),
        }
    }
}

async fn read_command(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            tracing::debug!(program, status = %output.status, "Dark preference query failed");
            None
        }
        Err(e) => {
            tracing::debug!(program, "Dark preference query unavailable: {e}");
            None
        }
    }
}
