//! Command-line interface for the AlphaOne research dashboard

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;

use alpha_utils::{LogFormat, init_tracing};

mod commands;
mod config;

use crate::config::ConfigArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "alpha")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: ConfigArgs,

    /// Emit newline-delimited JSON logs
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Host to bind to
        #[arg(long, env = "ALPHA_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "ALPHA_PORT")]
        port: Option<u16>,
    },

    /// Render the dashboard for a ticker to a standalone HTML file
    Render {
        /// Ticker to show
        ticker: String,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the research service and use generated data
        #[arg(long)]
        offline: bool,
    },

    /// Print a ticker's profile as tables
    Show {
        /// Ticker to show
        ticker: String,

        /// Skip the research service and use generated data
        #[arg(long)]
        offline: bool,
    },

    /// Explain a financial metric
    Explain {
        /// Metric name, e.g. "Current Ratio"
        metric: String,
    },

    /// Fetch closing prices into a live-data override file
    LiveData {
        /// Tickers to fetch
        #[arg(short, long = "ticker", required = true, num_args = 1..)]
        tickers: Vec<String>,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::from_env()
    };
    init_tracing(format);

    match cli.command {
        Commands::Serve { host, port } => {
            let config = cli.config.into_config(host, port)?;
            alpha_server::serve(config).await?;
        }
        Commands::Render {
            ticker,
            output,
            offline,
        } => {
            let config = cli.config.into_config(None, None)?;
            commands::render::execute(config, &ticker, output, offline).await?;
        }
        Commands::Show { ticker, offline } => {
            let config = cli.config.into_config(None, None)?;
            commands::show::execute(config, &ticker, offline).await?;
        }
        Commands::Explain { metric } => commands::explain::execute(&metric),
        Commands::LiveData { tickers, output } => {
            commands::live_data::execute(&tickers, &output).await?;
        }
    }

    Ok(())
}
