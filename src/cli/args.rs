//! Command-line argument parsing.
//!
//! Flags are few and flat, so parsing is a simple pass over the arguments.
//! Unknown flags are ignored; malformed values are errors.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{CardStackError, CardStackResult};

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI demo (default)
    Run(RunOptions),
}

/// Overrides collected from the command line, applied over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub items: Option<usize>,
    pub visible: Option<usize>,
    pub duration: Option<Duration>,
    pub lock_x: bool,
    pub lock_y: bool,
    pub overlay: bool,
    pub missing: Option<Vec<usize>>,
    pub config_path: Option<PathBuf>,
}

impl RunOptions {
    /// Apply the overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(items) = self.items {
            config.deck_size = items;
        }
        if let Some(visible) = self.visible {
            config.stack.max_visible_items = visible;
        }
        if let Some(duration) = self.duration {
            config.stack.shuffle_animation_duration = duration;
        }
        if self.lock_x {
            config.stack.prevent_x = true;
        }
        if self.lock_y {
            config.stack.prevent_y = true;
        }
        if self.overlay {
            config.use_overlay = true;
        }
        if let Some(missing) = &self.missing {
            config.missing_items = missing.clone();
        }
    }
}

/// Parse command-line arguments and return the command to execute.
///
/// `--version` and `--help` win over everything else, wherever they appear.
///
/// # Examples
///
/// ```
/// use cardstack::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["cardstack".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CardStackResult<CliCommand>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--items" => options.items = Some(parse_count("--items", args.next())?),
            "--visible" => options.visible = Some(parse_count("--visible", args.next())?),
            "--duration-ms" => {
                let millis = parse_count("--duration-ms", args.next())?;
                options.duration = Some(Duration::from_millis(millis as u64));
            }
            "--lock-x" => options.lock_x = true,
            "--lock-y" => options.lock_y = true,
            "--overlay" => options.overlay = true,
            "--missing" => options.missing = Some(parse_list("--missing", args.next())?),
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CardStackError::MissingArgument("--config".to_string()))?;
                options.config_path = Some(PathBuf::from(path));
            }
            other => tracing::debug!(arg = other, "Ignoring unknown argument"),
        }
    }

    Ok(CliCommand::Run(options))
}

fn parse_count(flag: &str, value: Option<String>) -> CardStackResult<usize> {
    let value = value.ok_or_else(|| CardStackError::MissingArgument(flag.to_string()))?;
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| CardStackError::invalid_argument(flag, &value, e.to_string()))
}

fn parse_list(flag: &str, value: Option<String>) -> CardStackResult<Vec<usize>> {
    let value = value.ok_or_else(|| CardStackError::MissingArgument(flag.to_string()))?;
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|e| CardStackError::invalid_argument(flag, part, e.to_string()))
        })
        .collect()
}
