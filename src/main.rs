use anyhow::Result;
use clap::{Parser, Subcommand};

/// schoolmeal - School meal calendar and leftover dashboard
#[derive(Parser)]
#[command(name = "schoolmeal")]
#[command(about = "School meal calendar and leftover dashboard", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the menu calendar of a month
    Calendar {
        #[arg(long)]
        year: i32,

        /// Month number, 1 to 12
        #[arg(long)]
        month: u8,
    },
    /// Print the daily leftover rates of a month
    Waste {
        #[arg(long)]
        year: i32,

        /// Month number, 1 to 12
        #[arg(long)]
        month: u8,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = schoolmeal::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    schoolmeal::observability::init_observability(
        "schoolmeal",
        &config.log.level,
        &config.log.format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => schoolmeal::cli::server::serve(config, host, port).await,
        Commands::Calendar { year, month } => {
            schoolmeal::cli::report::calendar(config, year, month).await
        }
        Commands::Waste { year, month } => schoolmeal::cli::report::waste(config, year, month).await,
    }
}
