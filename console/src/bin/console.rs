//! Headless console binary.
//!
//! Reads JSON-lines commands from stdin, renders alerts and theme changes to
//! the log, and shuts down on Ctrl+C or end of input.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use operator_console_lib::{input, output};
use operator_console_lib::shutdown::graceful_shutdown;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Operator Console (headless mode)");

    let (db, config, dir) = operator_console_lib::init_foundation()?;
    tracing::info!("Data directory: {}", dir.display());

    let mut console = operator_console_lib::build_console(db, &config);

    let printer = tokio::spawn(output::forward_updates(
        console.queue.subscribe(),
        std::io::stdout(),
    ));

    operator_console_lib::on_init(&mut console.ctx).await;
    tracing::info!(
        theme = ?console.ctx.theme().applied(),
        "Console running. Press Ctrl+C to stop."
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down...");
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) => match input::parse_line(&line) {
                    Ok(Some(command)) => {
                        if let Err(e) = input::apply(&console, command) {
                            tracing::warn!("Command failed: {e}");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Skipping input line: {e}"),
                },
                None => {
                    tracing::info!("Input closed, shutting down");
                    break;
                }
            },
        }
    }

    graceful_shutdown(&mut console).await;
    printer.abort();
    Ok(())
}
