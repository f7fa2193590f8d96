//! Command handlers for the handball CLI.
//!
//! Each handler takes its output streams as `&mut dyn Write` and returns
//! `Result<(), CliError>`.

pub mod cfg;
pub mod rng;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use rng::handle_rng_command;
pub use sim::{SimArgs, handle_sim_command};
