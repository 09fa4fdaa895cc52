#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube_core::{Color, Cube, MoveSequence, Scrambler, Variant};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info, warn};
use owo_colors::OwoColorize;
use session::{
    FileStore, KeyValueStore, MemoryStore, Pacer, PlaybackConfig, Session, Ticker, playback,
};
use visualizer::{DragController, Orientation, Physics, net};

/// Scrambles, paints and replays solutions on a virtual Rubik's cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format. Defaults to
    /// `cubesolve.toml` in the user's config directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    /// Print the net in color
    #[arg(long, global = true)]
    color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a solved cube.
    Scramble {
        /// `3x3` or `2x2`
        #[arg(long, default_value = "3x3")]
        variant: Variant,
        /// Number of moves; defaults to the configured length.
        #[arg(long)]
        length: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Play the scramble back at scramble speed.
        #[arg(long)]
        animate: bool,
    },
    /// Play a solver's answer back, e.g. "R2 U3 F1".
    Replay {
        solution: String,
        #[arg(long, default_value = "3x3")]
        variant: Variant,
        /// Moves applied before the solution, e.g. "R U R' U'".
        #[arg(long)]
        scramble: Option<String>,
    },
    /// Print the face-notation string of a cube.
    Notation {
        #[arg(long, default_value = "3x3")]
        variant: Variant,
        /// Moves applied to the solved cube first.
        #[arg(long)]
        moves: Option<String>,
    },
    /// Paint stickers interactively.
    Paint {
        /// Switch the session to this puzzle.
        #[arg(long)]
        variant: Option<Variant>,
    },
    /// Flick the 3D cube and print how it coasts to a stop.
    Spin {
        /// Horizontal flick in pixels per frame.
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,
        /// Vertical flick in pixels per frame.
        #[arg(long, allow_hyphen_values = true)]
        dy: f64,
        /// Stop printing after this many frames.
        #[arg(long, default_value_t = 600)]
        frames: usize,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = PlaybackConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Scramble {
            variant,
            length,
            seed,
            animate,
        } => {
            let mut scrambler = match seed {
                Some(seed) => Scrambler::with_seed(seed),
                None => Scrambler::default(),
            };
            let scramble = scrambler.generate(length.unwrap_or(config.scramble_length));
            println!("{scramble}");

            let mut cube = Cube::new(variant);
            if animate {
                playback::play_scramble(
                    &mut cube,
                    &scramble,
                    config.scramble_delay(),
                    &mut Ticker::new(),
                    |step, _| eprint!("{step} "),
                );
                eprintln!();
            } else {
                cube.apply_sequence(&scramble);
            }

            println!("{}", net::render(cube.state(), cli.color));
        }
        Commands::Replay {
            solution,
            variant,
            scramble,
        } => {
            let mut cube = Cube::new(variant);
            if let Some(scramble) = scramble {
                cube.apply_sequence(&scramble.parse::<MoveSequence>()?);
            }

            let verbose = cli.log_level >= 1;
            let played = playback::play_solution(
                &mut cube,
                &solution,
                config.solve_delay(),
                &mut Ticker::new(),
                |step, state| {
                    if verbose {
                        println!("{step}\n{}\n", net::render(state, cli.color));
                    }
                },
            );

            println!("{}", net::render(cube.state(), cli.color));
            if cube.is_solved() {
                println!("{}", format!("Solved in {played} quarter turns").green());
            } else {
                println!("{}", format!("Not solved after {played} quarter turns").red());
            }
        }
        Commands::Notation { variant, moves } => {
            let mut cube = Cube::new(variant);
            if let Some(moves) = moves {
                cube.apply_sequence(&moves.parse::<MoveSequence>()?);
            }

            println!("{}", cube.state().face_notation()?);
        }
        Commands::Paint { variant } => match store_path() {
            Some(path) => {
                let session = Session::open(FileStore::open(&path)?, config)?;
                paint_repl(session, variant, cli.color)?;
            }
            None => {
                warn!("No data directory, the session won't be saved");
                let session = Session::open(MemoryStore::new(), config)?;
                paint_repl(session, variant, cli.color)?;
            }
        },
        Commands::Spin { dx, dy, frames } => spin(&config, dx, dy, frames),
    }

    Ok(())
}

fn store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("cubesolve").join("session.toml"))
}

fn spin(config: &PlaybackConfig, dx: f64, dy: f64, frames: usize) {
    let mut controller = DragController::new(Physics::from(config), Orientation::default());
    let start = Instant::now();

    controller.press(0.0, 0.0, start);
    controller.drag_to(dx, dy, start + Duration::from_millis(16));
    println!("{}", controller.transform());

    if !controller.release() {
        println!("Too slow to coast");
        return;
    }

    let mut ticker = Ticker::new();
    for frame in 1..=frames {
        let coasting = controller.frame();
        println!("{frame:>4} {}", controller.transform());
        if !coasting {
            return;
        }
        ticker.wait(Duration::from_millis(16));
    }

    info!("Stopped printing after {frames} frames");
}

const PAINT_HELP: &str = "\
Commands:
  select <color>   choose the brush (white, orange, green, red, blue, yellow, blank)
  paint <index>    paint one sticker with the brush
  clear            blank every sticker
  reset            restore the solved cube
  random           random colors within the budget
  login <name>     set the account used for device notifications
  event <line>     feed a device notification, e.g. alice_status:ready
  show             print the cube
  notation         print the face-notation string
  quit             leave";

fn paint_repl<S: KeyValueStore>(
    mut session: Session<S>,
    variant: Option<Variant>,
    colored: bool,
) -> color_eyre::Result<()> {
    if let Some(variant) = variant {
        session.set_variant(variant)?;
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut rng = fastrand::Rng::new();

    eprintln!("{PAINT_HELP}");
    println!("{}", net::render(session.state(), colored));

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let (command, argument) = match line.trim().split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line.trim(), ""),
        };

        let result = match command {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                eprintln!("{PAINT_HELP}");
                Ok(())
            }
            "select" => argument
                .parse::<Color>()
                .map_err(|e| eyre!(e))
                .and_then(|color| session.select(color).map_err(|e| eyre!(e))),
            "paint" => argument
                .parse::<usize>()
                .map_err(|e| eyre!("Invalid sticker index `{argument}`: {e}"))
                .and_then(|index| session.paint(index).map_err(|e| eyre!(e)))
                .map(|_| println!("{}", net::render(session.state(), colored))),
            "clear" => {
                session.clear();
                Ok(())
            }
            "reset" => {
                session.reset();
                Ok(())
            }
            "random" => {
                session.randomize(&mut rng);
                println!("{}", net::render(session.state(), colored));
                Ok(())
            }
            "login" => session.log_in(argument).map_err(|e| eyre!(e)),
            "event" => tx
                .send(argument.to_owned())
                .map_err(|e| eyre!(e))
                .map(|()| {
                    session.poll_devices(&rx);
                    print!("{}", session.device_log().text());
                }),
            "show" => {
                println!("{}", net::render(session.state(), colored));
                let disabled = session.palette().disabled_colors().join(", ");
                if !disabled.is_empty() {
                    println!("Used up: {disabled}");
                }
                Ok(())
            }
            "notation" => session
                .state()
                .face_notation()
                .map(|notation| println!("{notation}"))
                .map_err(|e| eyre!(e)),
            _ => Err(eyre!("Unknown command `{command}`, try `help`")),
        };

        // Rejections are reported, never fatal
        if let Err(e) = result {
            println!("{}", e.red());
        }
    }
}
