use std::sync::Arc;

use anyhow::Context;
use bookstore::{
    cli_args::CliArgs,
    server::{Server, ServerConfig},
    state::ApiState,
    store::PgBookStore,
};
use clap::Parser;

fn init_tracing() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .context("Failed to set global tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "server=trace,bookstore=trace,tower_http=trace");
    }

    init_tracing()?;

    tracing::info!("Starting ...");

    let args = CliArgs::parse();

    let store = PgBookStore::connect(&args.db.connection_string())
        .await
        .context("Failed to connect to the database")?;

    store
        .init_schema()
        .await
        .context("Failed to initialize the database schema")?;

    let state = ApiState::new(args.error_verbosity, Arc::new(store));

    let server_config = ServerConfig::new(args.listen_address);
    let server = Server::new(server_config);

    server.run(state).await?;

    Ok(())
}
