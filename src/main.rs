use anyhow::Result;
use clap::{Parser, Subcommand};

/// mealweek - weekly meal grid with drag-and-drop rearrangement
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Weekly meal grid with drag-and-drop rearrangement", long_about = None)]
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
    /// Run database migrations
    Migrate,
    /// Drop the database and recreate it with migrations
    Reset,
    /// Fill the configured week-scope with an empty 14-slot grid
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealweek::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealweek::observability::init(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            mealweek::server::serve(&config, &host, port).await
        }
        Commands::Migrate => mealweek::migrate::migrate(&config).await,
        Commands::Reset => mealweek::migrate::reset(&config).await,
        Commands::Seed => mealweek::migrate::seed(&config).await,
    }
}
