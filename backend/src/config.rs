//! Runtime configuration, read from command line flags or environment variables.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::storage::connection::DEFAULT_DATABASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "budget-tracker", version, about = "Personal finance tracker API server")]
pub struct AppConfig {
    /// SQLite database URL
    #[arg(long, env = "BUDGET_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "BUDGET_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Origin allowed to call the API from a browser
    #[arg(long, env = "BUDGET_CORS_ORIGIN", default_value = "http://localhost:8080")]
    pub cors_origin: String,

    /// Directory of static frontend files served for non-API paths
    #[arg(long, env = "BUDGET_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Insert the default expense and income categories on startup
    #[arg(long, env = "BUDGET_SEED_DEFAULTS", default_value_t = false)]
    pub seed_defaults: bool,

    /// Maximum number of pooled SQLite connections
    #[arg(long, env = "BUDGET_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, env = "BUDGET_LOG", default_value = "info")]
    pub log_filter: String,
}
