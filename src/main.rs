//! Game store admin dashboard server
//!
//! ```text
//! gamestore_admin [--env dev] [--port 8000] [--seed fixtures/seed.json]
//! gamestore_admin --issue-token <user_id>
//! ```
//!
//! Uses PostgreSQL when `postgres_url` is configured, otherwise an
//! in-memory store (optionally seeded from JSON).

use std::sync::Arc;

use anyhow::Context;

use gamestore_admin::config::AppConfig;
use gamestore_admin::db::Database;
use gamestore_admin::gateway::{self, state::AppState};
use gamestore_admin::store::{MemoryStore, Repositories, Seed};
use gamestore_admin::{ManagementService, SessionKeys};

// ============================================================
// COMMAND LINE
// ============================================================

fn arg_value(flags: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if flags.contains(&args[i].as_str()) && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn get_env() -> String {
    arg_value(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    arg_value(&["--port"]).and_then(|p| p.parse().ok())
}

fn get_seed_path() -> Option<String> {
    arg_value(&["--seed"])
}

fn get_issue_token() -> anyhow::Result<Option<i64>> {
    arg_value(&["--issue-token"])
        .map(|id| id.parse().context("--issue-token expects a numeric user id"))
        .transpose()
}

// ============================================================
// MAIN
// ============================================================

async fn build_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    if let Some(url) = &config.postgres_url {
        let db = Database::connect(url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        if get_seed_path().is_some() {
            tracing::warn!("--seed is ignored with a PostgreSQL backend");
        }
        return Ok(Repositories::postgres(Arc::new(db)));
    }

    tracing::warn!("No postgres_url configured; using the in-memory store");
    let seed = match get_seed_path() {
        Some(path) => {
            let seed = Seed::from_json_file(&path)?;
            tracing::info!(
                path = %path,
                games = seed.games.len(),
                users = seed.users.len(),
                orders = seed.orders.len(),
                "Seeded in-memory store"
            );
            seed
        }
        None => Seed::default(),
    };
    Ok(Repositories::in_memory(Arc::new(MemoryStore::from_seed(seed))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;

    let sessions = SessionKeys::new(&config.jwt_secret);
    if let Some(user_id) = get_issue_token()? {
        println!("{}", sessions.issue(user_id)?);
        return Ok(());
    }

    let _log_guard = gamestore_admin::logging::init_logging(&config);
    tracing::info!("Starting gamestore admin dashboard in {} mode", env);

    let repos = build_repositories(&config).await?;
    let service = ManagementService::from_config(repos.clone(), &config);
    let state = Arc::new(AppState::new(service, repos, sessions));

    let port = get_port_override().unwrap_or(config.gateway.port);
    gateway::run_server(&config.gateway.host, port, state).await
}
