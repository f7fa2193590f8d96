//! File helpers shared by the commands: roster loading and output paths.

use handball_engine::roster::Roster;

use crate::error::CliError;

/// Reads a text file, stripping a leading UTF-8 BOM.
pub fn read_text(path: &str) -> Result<String, String> {
    let mut content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Loads a roster from a JSON file.
///
/// The roster must already carry resolved ratings; role validation happens
/// in the engine when the match starts.
///
/// ```rust,no_run
/// # use handball_cli::io_utils::load_roster;
/// let roster = load_roster("data/hawks.json").unwrap();
/// println!("{} players", roster.player_count());
/// ```
pub fn load_roster(path: &str) -> Result<Roster, CliError> {
    let text = read_text(path)
        .map_err(|e| CliError::InvalidInput(format!("cannot read roster {}: {}", path, e)))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::InvalidInput(format!("cannot parse roster {}: {}", path, e)))
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
