//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};

use super::{validate_config, MachineConfig};

/// Longest message kept in a [`ConfigError`].
const MESSAGE_LEN: usize = 128;

/// Read, parse and validate a plotter configuration file.
///
/// ```rust,ignore
/// use plotter_motion::load_config;
///
/// let config = load_config("plotter.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MachineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(message(format_args!("{}: {}", path.display(), e))))?;

    debug!("Loaded {} bytes of configuration", content.len());
    parse_config(&content)
}

/// Parse and validate a TOML configuration.
///
/// Parse errors carry the 1-based line of the offending value when TOML
/// reports one.
pub fn parse_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig = toml::from_str(content).map_err(|e| {
        let text = match e.span() {
            Some(span) => message(format_args!(
                "line {}: {}",
                line_of(content, span.start),
                e.message()
            )),
            None => message(format_args!("{}", e.message())),
        };
        ConfigError::ParseError(text)
    })?;

    validate_config(&config)?;
    Ok(config)
}

fn line_of(content: &str, offset: usize) -> usize {
    content
        .bytes()
        .take(offset)
        .filter(|b| *b == b'\n')
        .count()
        + 1
}

/// Format into a bounded string, cutting at the last character that fits.
fn message(args: core::fmt::Arguments<'_>) -> heapless::String<MESSAGE_LEN> {
    let full = args.to_string();
    let mut out = heapless::String::new();
    for c in full.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
