use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::oneshot;

use stock_ledger::cfg::CONFIG;
use stock_ledger::logging;
use stock_ledger::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&CONFIG.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    Server::new(pool).start(shutdown_rx).await
}
