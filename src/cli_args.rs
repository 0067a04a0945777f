use std::net::SocketAddr;

use clap::Parser;

use crate::{config::DbConfig, error::ErrorVerbosity};

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Address the HTTP server binds to.
    #[clap(long, env = "LISTEN_ADDRESS", default_value = "127.0.0.1:5000")]
    pub listen_address: SocketAddr,

    /// How much error detail responses carry.
    #[clap(long, env = "ERROR_VERBOSITY", value_enum, default_value = "message")]
    pub error_verbosity: ErrorVerbosity,

    #[clap(flatten)]
    pub db: DbConfig,
}
