use crate::app::NoteService;
use crate::backends::{IdStrategy, JsonFileBackend, MemoryBackend};
use crate::setup::logging::level_from_verbosity;
use crate::NoteBackend;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct Args {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive numbered menu on stdin/stdout. Uses the file backend unless told otherwise
    Menu {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// HTTP API under /notes. Uses the memory backend unless told otherwise
    Serve {
        #[arg(long, env = "NOTEKEEP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        host: IpAddr,
        #[arg(short, long, env = "NOTEKEEP_PORT", default_value_t = 5000)]
        port: u16,
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct StoreArgs {
    /// Where notes are kept
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,
    /// Backing file for the file backend
    #[arg(short, long, env = "NOTEKEEP_FILE", default_value = "notes.json")]
    file: PathBuf,
    /// How the file backend numbers new notes
    #[arg(long, value_enum, default_value_t = IdStrategy::default())]
    id_strategy: IdStrategy,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum BackendKind {
    File,
    Memory,
}

/// What the binary should do after startup
pub enum Launch {
    Menu(NoteService),
    Serve { addr: SocketAddr, service: NoteService },
}

pub struct Setup {
    pub log_level: LevelFilter,
    pub launch: Launch,
}

impl StoreArgs {
    fn into_service(self, fallback: BackendKind) -> NoteService {
        // Allow any struct that implements NoteBackend, shared behind an Arc
        let backend: Arc<dyn NoteBackend> = match self.backend.unwrap_or(fallback) {
            BackendKind::File => Arc::new(JsonFileBackend::new(self.file, self.id_strategy)),
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
        };
        NoteService::new(backend)
    }
}

impl Args {
    /// Builds the backend and service the parsed arguments ask for
    #[must_use]
    pub fn into_setup(self) -> Setup {
        let launch = match self.command {
            Command::Menu { store } => Launch::Menu(store.into_service(BackendKind::File)),
            Command::Serve { host, port, store } => Launch::Serve {
                addr: SocketAddr::new(host, port),
                service: store.into_service(BackendKind::Memory),
            },
        };

        Setup {
            log_level: level_from_verbosity(self.verbose),
            launch,
        }
    }
}

/// Parses command-line arguments and builds the chosen backend and frontend.
///
/// Exits the process with usage information if the arguments are invalid.
#[must_use]
pub fn handle_args() -> Setup {
    Args::parse().into_setup()
}
