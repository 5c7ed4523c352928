use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reviewflow_shared::config::DEFAULT_API_BASE;

#[derive(Parser)]
#[command(name = "rf-cli", version, about = "ReviewFlow command-line client")]
pub struct Cli {
    /// API origin, e.g. `https://reviews.example.com`.
    #[arg(long, global = true, env = "REVIEWFLOW_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    /// Directory holding the admin token file (defaults to `~/.reviewflow`).
    #[arg(long, global = true, env = "REVIEWFLOW_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
    /// Delay between status polls in milliseconds.
    #[arg(long, global = true, env = "REVIEWFLOW_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,
    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a review.
    Submit {
        /// Star rating from 1 to 5.
        #[arg(long)]
        rating: u8,
        /// Review text.
        #[arg(long)]
        review: String,
        /// Keep polling until the submission is processed.
        #[arg(long)]
        watch: bool,
    },
    /// Show the processing status of a submission.
    Status {
        /// Submission id.
        id: String,
        /// Keep polling until the submission is processed.
        #[arg(long)]
        watch: bool,
    },
    /// Sign in as admin and store the token.
    Login {
        /// Admin username.
        #[arg(long)]
        username: String,
        /// Admin password.
        #[arg(long, env = "REVIEWFLOW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored admin token.
    Logout,
    /// List submissions (admin).
    List {
        /// Only this star rating (`1`..`5`, or `all`).
        #[arg(long)]
        rating: Option<String>,
        /// Only this status (`PENDING`, `COMPLETED`, `FAILED`, or `all`).
        #[arg(long)]
        status: Option<String>,
        /// Search text.
        #[arg(long)]
        q: Option<String>,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Show aggregate counts (admin).
    Analytics,
}
