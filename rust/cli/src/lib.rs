//! # Handball CLI Library
//!
//! Command-line front end for the `handball_engine` match simulator. The
//! binary is a thin wrapper around [`run`], which parses arguments and
//! dispatches to a command handler.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handball", "sim", "--home", "hawks.json", "--away", "owls.json", "--seed", "7"];
//! let code = handball_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Simulate one match between two roster files
//! - `cfg`: Display the resolved configuration and its sources
//! - `rng`: Print a sample of the seeded probability stack

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;

use cli::{Commands, HandballCli};
use commands::{SimArgs, handle_cfg_command, handle_rng_command, handle_sim_command};

pub use config::{Config, ConfigResolved, ConfigSources, ValueSource};
pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "cfg", "rng"];

/// Parses `args` and runs the selected command.
///
/// Returns the process exit code: `0` on success, `2` on any error.
///
/// ```
/// use std::io;
/// let code = handball_cli::run(["handball", "rng", "--seed", "42"], &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandballCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                write_or_exit!(out, "{}", e);
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Handball match simulator");
            write_or_exit!(err, "Usage: handball <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: handball --help");
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            home,
            away,
            seed,
            output,
            update_rosters,
            verbose,
        } => {
            logging::init_logging(verbose);
            let args = SimArgs {
                home,
                away,
                seed,
                output,
                update_rosters,
            };
            handle_sim_command(&args, out, err)
        }
        Commands::Cfg => handle_cfg_command(out),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
