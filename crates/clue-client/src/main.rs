use std::net::TcpStream;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, event};

use clue_bot::{DeductionEngine, TracingJournal};
use clue_client::config::{ClientConfig, Framing};
use clue_client::logging::init_logging;
use clue_client::protocol::{BufferedMessenger, LineMessenger};
use clue_client::session::Session;

/// Clue deduction player that connects to a game server.
#[derive(Debug, Parser)]
#[command(
    name = "clue-player",
    author,
    version,
    about = "Deductive Clue player speaking the line protocol"
)]
struct Cli {
    /// Name announced to the server; also names the log file.
    name: String,

    /// Server port (falls back to `server.port` in the config file).
    port: Option<u16>,

    /// Server host name.
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Message framing used by the server.
    #[arg(long, value_enum)]
    framing: Option<Framing>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Directory for the log file.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Disable the log file entirely.
    #[arg(long)]
    no_log: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::default(),
    };

    if let Some(port) = cli.port {
        config.server.port = Some(port);
    }

    if let Some(host) = cli.host {
        config.server.host = host;
    }

    if let Some(framing) = cli.framing {
        config.server.framing = framing;
    }

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if let Some(dir) = cli.log_dir {
        config.logging.directory = dir;
    }

    if cli.no_log {
        config.logging.enabled = false;
    }

    config.validate()?;
    let port = config
        .server
        .port
        .context("no server port given on the command line or in the config file")?;

    let _logging_guard = init_logging(&config.logging, &cli.name)?;

    let host = config.server.host.as_str();
    let stream = TcpStream::connect((host, port))
        .with_context(|| format!("connecting to {host}:{port}"))?;
    event!(
        target: "clue_client::main",
        Level::INFO,
        player = %cli.name,
        host,
        port,
        framing = ?config.server.framing,
        "connected"
    );

    let deck = config.deck();
    let engine = DeductionEngine::new(deck.clone()).with_journal(TracingJournal);
    match config.server.framing {
        Framing::Line => {
            let messenger = LineMessenger::connect(stream).context("splitting the socket")?;
            Session::new(cli.name, deck, engine, messenger).run()?;
        }
        Framing::Buffered => {
            let messenger = BufferedMessenger::connect(stream).context("splitting the socket")?;
            Session::new(cli.name, deck, engine, messenger).run()?;
        }
    }

    event!(target: "clue_client::main", Level::INFO, "session finished");
    Ok(())
}
