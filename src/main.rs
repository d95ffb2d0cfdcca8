use clap::{Arg, ArgAction, Command as ClapCommand};
use log::{error, LevelFilter};
use std::process;

use dngmeta::commands::{CommandFactory, DngmetaCommandFactory};
use dngmeta::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("dngmeta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode the metadata tags of DNG files")
        .arg(
            Arg::new("input")
                .help("Input DNG files")
                .value_name("FILES")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Mirror log output to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .help("Only show tags whose name or code matches this regex")
                .value_name("REGEX")
                .required(false),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .help("TOML tag catalog overlaid on the built-in one")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Decode files even when they are not .dng")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("warnings")
                .long("warnings")
                .help("Print decoding diagnostics in reports")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .help("Export metadata instead of printing reports")
                .value_name("FORMAT")
                .value_parser(["toml", "xml"])
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Export destination (defaults to stdout)")
                .value_name("FILE")
                .requires("export")
                .required(false),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => Logger::init_console_logger(level),
    }

    let factory = DngmetaCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
