//! `cfg`: prints the resolved configuration with the source of each value.
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "allow_ties": { "value": true, "source": "default" },
//!   "half_seconds": { "value": 1800, "source": "default" }
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "allow_ties": {
            "value": config.allow_ties,
            "source": sources.allow_ties,
        },
        "half_seconds": {
            "value": config.half_seconds,
            "source": sources.half_seconds,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
