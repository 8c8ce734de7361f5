pub mod alerts;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod input;
pub mod lifecycle;
pub mod navigation;
pub mod output;
pub mod platform;
pub mod router;
pub mod settings;
pub mod shutdown;
pub mod theme;
pub mod window;

#[cfg(test)]
mod test_support;

pub use bootstrap::{Console, build_console, init_foundation};
pub use lifecycle::{on_init, on_teardown};
