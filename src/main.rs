//! The kestrel chess engine.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::{Path, PathBuf};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter};
use kestrel::chess::{Position, STARTING_FEN};
use kestrel::chess::perft::{perft, divide};
use kestrel::config::Config;
use kestrel::engine::Search;

fn main() -> Result<(), Error> {
    let depth_arg = Arg::with_name("depth")
        .long("depth")
        .short("d")
        .value_name("DEPTH")
        .takes_value(true);
    let fen_arg = Arg::with_name("fen")
        .value_name("FEN_STRING")
        .default_value(STARTING_FEN)
        .hide_default_value(true)
        .help("Position in Forsyth-Edwards Notation (FEN), quoted. Defaults to the standard \
               starting position.");

    let matches =
        App::new("Kestrel")
            .version(crate_version!())
            .author("Kestrel Developers")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from a YAML file"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on [default: kestrel.log]"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .help("Sets the log level if logging is turned on [default: info]"))
            .subcommand(SubCommand::with_name("perft")
                .about("Counts the variations from a position to a specified depth")
                .arg(depth_arg.clone()
                    .required(true)
                    .help("Depth to count to"))
                .arg(fen_arg.clone()))
            .subcommand(SubCommand::with_name("divide")
                .about("Counts the variations below each move of a position")
                .arg(depth_arg.clone()
                    .required(true)
                    .help("Depth to count to"))
                .arg(fen_arg.clone()))
            .subcommand(SubCommand::with_name("search")
                .about("Searches a position for the best move")
                .arg(depth_arg
                    .help("Depth to search [default: from the settings, or 4]"))
                .arg(fen_arg))
            .get_matches();

    let mut config = match matches.value_of_os("config") {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    if let Some(file) = matches.value_of_os("log-file") {
        config.log_file = PathBuf::from(file);
    }
    if let Some(level) = matches.value_of("log-level") {
        config.log_level = level.to_owned();
    }

    let log_level = match config.log_level.as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        level => return Err(Error(format!("{}: invalid log level", level))),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            simplelog::Config::default(),
            File::create(&config.log_file).map_err(|err| {
                Error(format!("{}: {}", config.log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, simplelog::Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("perft", Some(matches)) => {
            let depth = parse_depth(matches)?.expect("INFALLIBLE");
            let mut pos = parse_position(matches)?;
            let stats = perft(&mut pos, depth);

            println!("{}", pos);
            println!("Depth {} nodes:\t{:12}", depth, stats.nodes);
            println!("Captures:\t{:12}", stats.captures);
            println!("En passant:\t{:12}", stats.en_passants);
            println!("Castles:\t{:12}", stats.castles);
            println!("Promotions:\t{:12}", stats.promotions);
            println!("Checks:\t\t{:12}", stats.checks);
        },
        ("divide", Some(matches)) => {
            let depth = parse_depth(matches)?.expect("INFALLIBLE");
            let mut pos = parse_position(matches)?;
            let counts = divide(&mut pos, depth);

            println!("{}", pos);
            for (mv, count) in counts.iter() {
                println!("{}:\t{:12}", mv, count);
            }
            println!("Moves:\t{:12}", counts.len());
            println!("Total:\t{:12}", counts.iter().map(|&(_, n)| n).sum::<u64>());
        },
        ("search", Some(matches)) => {
            let depth = parse_depth(matches)?.unwrap_or(config.depth);
            let pos = parse_position(matches)?;
            let result = Search::new(pos).minimax_root(depth);

            match result.best_move() {
                Some(mv) => println!("bestmove {} score {} nodes {}",
                    mv, result.score(), result.nodes()),
                None => println!("{} score {}", result.status(), result.score()),
            }
        },
        _ => unreachable!(),
    }

    Ok(())
}

fn parse_depth(matches: &ArgMatches<'_>) -> Result<Option<usize>, Error> {
    match matches.value_of("depth") {
        Some(depth) => depth
            .parse()
            .map(Some)
            .map_err(|_| Error("depth must be numeric".to_owned())),
        None => Ok(None),
    }
}

fn parse_position(matches: &ArgMatches<'_>) -> Result<Position, Error> {
    let fen = matches.value_of("fen").expect("INFALLIBLE");
    fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<kestrel::config::Error> for Error {
    fn from(err: kestrel::config::Error) -> Self {
        Error(err.to_string())
    }
}
