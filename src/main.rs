use std::{io::stdin, path::PathBuf, time::SystemTime};

use anyhow::Result;
use clap::{Parser, Subcommand};
use king_capture_chess::GameState;
use log::{LevelFilter, info};
use terminal::TerminalInterface;

mod terminal;

build_info::build_info!(fn build_info);

#[derive(Parser, Debug)]
#[command(version, about = "Chess where capturing the king wins")]
struct Cli {
    /// Lowest level of log message to write
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Append log messages to this file instead of writing them to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play both sides in the terminal. This is the default command.
    Play {
        /// Start from "<piece placement> <w|b>" instead of the standard layout
        #[arg(long)]
        position: Option<String>,
    },
    /// Count the positions reachable in exactly `depth` moves
    Perft {
        depth: u8,

        /// Print the count below each first move
        #[arg(long)]
        divide: bool,

        /// Start from "<piece placement> <w|b>" instead of the standard layout
        #[arg(long)]
        position: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.log_level, cli.log_file.as_ref())?;
    log_panics::init();

    let build_info = build_info();
    info!(
        "{} {} built {}",
        build_info.crate_info.name,
        build_info.crate_info.version,
        build_info.timestamp
    );

    match cli.command.unwrap_or(Command::Play { position: None }) {
        Command::Play { position } => {
            let state = load_position(position.as_deref())?;
            let mut interface = TerminalInterface::new(state)?;
            interface.run(stdin().lock())?;
        }
        Command::Perft {
            depth,
            divide,
            position,
        } => {
            let state = load_position(position.as_deref())?;
            let stats = state.start_perft(depth, divide)?;
            if !divide {
                println!("{}", stats.nodes);
            }
        }
    }

    Ok(())
}

fn load_position(position: Option<&str>) -> Result<GameState> {
    match position {
        Some(p) => Ok(GameState::from_position(p)?),
        None => Ok(GameState::new()),
    }
}

fn setup_logger(level: LevelFilter, log_file: Option<&PathBuf>) -> Result<()> {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level);

    let dispatch = match log_file {
        Some(path) => dispatch.chain(fern::log_file(path)?),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply()?;
    Ok(())
}
