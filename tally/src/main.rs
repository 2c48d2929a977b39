use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tally::ansi::{RED, RESET};
use tally::DEFAULT_CONFIG_FILE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally - bounded, themed counters rendered to HTML", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page to a static HTML snapshot
    Render {
        /// Config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Start the development server with live updates and config reload
    Dev {
        /// Config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Port for dev server (overrides [dev].port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a command script against the page
    Play {
        /// Config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Script file (default: stdin)
        file: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { config, out } => tally::render_to(&config, out.as_deref()),
        Commands::Dev { config, port } => tally::server::run(&config, port).map_err(tally::Error::from),
        Commands::Play { config, file } => tally::play(&config, file.as_deref(), &mut io::stdout().lock()),
    };

    if let Err(e) = result {
        eprintln!("{}error{}: {}", RED, RESET, e);
        std::process::exit(1);
    }
}
