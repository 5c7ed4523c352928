pub mod analytics;
pub mod auth;
pub mod list;
pub mod status;
pub mod submit;

use std::time::Duration;

use anyhow::Result;
use reviewflow_shared::{ApiGateway, ClientConfig, SessionStore};
use serde::Serialize;

use crate::{
    cli::{Cli, Commands},
    storage::{self, FileStorage},
    transport::ReqwestTransport,
};

/// What every command needs: resolved config, a gateway and the output mode.
pub struct Context {
    pub config: ClientConfig,
    pub gateway: ApiGateway<ReqwestTransport>,
    pub json: bool,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        let mut config = ClientConfig::new(cli.api_base.as_str());
        if let Some(ms) = cli.poll_interval_ms.filter(|ms| *ms > 0) {
            config = config.with_poll_interval(Duration::from_millis(ms));
        }
        let state_dir = cli.state_dir.clone().unwrap_or_else(storage::default_state_dir);
        let session = SessionStore::new(FileStorage::in_dir(&state_dir));
        tracing::debug!(api_base = %config.api_base, state_dir = %state_dir.display(), "client configured");

        Self {
            gateway: ApiGateway::new(&config, ReqwestTransport::new(), session),
            config,
            json: cli.json,
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli);
    match cli.command {
        Commands::Submit {
            rating,
            review,
            watch,
        } => submit::run(&ctx, rating, &review, watch).await,
        Commands::Status {
            id,
            watch,
        } => status::run(&ctx, &id, watch).await,
        Commands::Login {
            username,
            password,
        } => auth::login(&ctx, &username, &password).await,
        Commands::Logout => auth::logout(&ctx),
        Commands::List {
            rating,
            status,
            q,
            page,
        } => list::run(&ctx, list::ListArgs {
            rating,
            status,
            q,
            page,
        })
        .await,
        Commands::Analytics => analytics::run(&ctx).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
