use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use vidplayer::library::InMemoryLibrary;
use vidplayer::player::{
    Command, PlayerControllerBuilder, PlayerEvent, PlayerEventHandler, ResultSelector,
};
use vidplayer::utils::{self, Config, PlayerError};

/// vidplayer - browse, play, moderate and organise a video catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file to load (text or .json)
    #[arg(short, long, value_name = "FILE")]
    library: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Seed for PLAY_RANDOM
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Configuration file to apply on top of the system and user files
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        utils::load_config(args.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging
    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting vidplayer v{}", env!("CARGO_PKG_VERSION"));

    let library = load_library(&args, &config)?;

    let mut builder = PlayerControllerBuilder::new(Arc::new(library))
        .with_event_handler(Box::new(ConsoleEventHandler));
    if let Some(seed) = args.seed.or(config.general.random_seed) {
        debug!("Using random seed {}", seed);
        builder = builder.with_seed(seed);
    }
    let mut player = builder.build();

    let interactive = args.script.is_none();
    let mut input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {:?}", path))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    println!("Hello and welcome to vidplayer, what would you like to do?");
    println!("Enter HELP for list of available commands or EXIT to terminate.");

    loop {
        if interactive {
            print!("{}", config.general.prompt);
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", parse_error_message(&e));
                continue;
            }
        };

        let mut selector = LineSelector { input: &mut input };
        if let ControlFlow::Break(()) = player.execute(&command, &mut selector) {
            break;
        }
    }

    println!("vidplayer has now terminated its execution. Thank you and goodbye!");
    Ok(())
}

/// Load the catalog named on the command line or in the configuration,
/// falling back to the bundled one
fn load_library(args: &Args, config: &Config) -> Result<InMemoryLibrary> {
    match args.library.as_ref().or(config.library.path.as_ref()) {
        Some(path) => InMemoryLibrary::load(path)
            .with_context(|| format!("Failed to load video catalog {:?}", path)),
        None => {
            info!("No catalog configured, using the bundled catalog");
            InMemoryLibrary::bundled().context("Bundled catalog is invalid")
        }
    }
}

/// Parse errors carry the full sentence to show the user
fn parse_error_message(err: &PlayerError) -> String {
    match err {
        PlayerError::InvalidInput(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Prints each event's status lines to stdout
struct ConsoleEventHandler;

impl PlayerEventHandler for ConsoleEventHandler {
    fn handle_event(&mut self, event: PlayerEvent) {
        if let PlayerEvent::CommandFailed { .. } = event {
            debug!("Reported failure: {}", event);
        }
        println!("{}", event);
    }
}

/// Reads the answer to a search prompt from the command input
struct LineSelector<'a> {
    input: &'a mut Box<dyn BufRead>,
}

impl ResultSelector for LineSelector<'_> {
    fn select(&mut self, _count: usize) -> Option<i64> {
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => answer.trim().parse().ok(),
            Err(e) => {
                error!("Failed to read selection: {}", e);
                None
            }
        }
    }
}
