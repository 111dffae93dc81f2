//! Server entry point.
//!
//! Startup order matters: configuration, then logging, then database open
//! (migrations applied), then a one-time schema check before the listener
//! starts accepting requests.

use log::info;
use tokio::net::TcpListener;

use todolite_core::db::open_db;
use todolite_core::{init_logging, SqliteTodoRepository};
use todolite_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    init_logging(&config.log_level, config.log_target())?;

    let conn = open_db(&config.db_path)?;
    SqliteTodoRepository::try_new(&conn)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "event=http_serve module=server status=start addr={} db={}",
        addr,
        config.db_path.display()
    );

    todolite_server::run(listener, conn).await?;
    Ok(())
}
