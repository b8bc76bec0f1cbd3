use std::sync::Arc;

use tokio::net::TcpListener;
use todo_core::{logging, Config, SqliteTodoRepository, TodoService};

#[tokio::main]
async fn main() -> Result<(), todo_core::Error> {
    let config = Config::load()?;
    logging::init(&config.logging);

    let repo = SqliteTodoRepository::open(&config.database.path)?;
    let service = TodoService::new(Arc::new(repo));
    let router = todo_server::app(service, &config.server.api_prefix);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, prefix = %config.server.api_prefix, db = %config.database.path, "listening");
    todo_server::run(listener, router).await?;
    Ok(())
}
