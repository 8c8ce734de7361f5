use std::time::Duration;

use tokio::time::sleep;

use crate::bootstrap::Console;
use crate::lifecycle::on_teardown;

pub async fn graceful_shutdown(console: &mut Console) {
    tracing::info!("Shutdown sequence started");

    let released = on_teardown(&mut console.ctx);
    let joined = console.ctx.join_released().await;
    tracing::info!(released, joined, "Shutdown: subscriptions released");

    console.queue.close().await;
    tracing::info!("Shutdown: alert queue closed");

    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
