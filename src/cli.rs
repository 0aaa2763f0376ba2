//! Process flags for MCP server binaries
//!
//! The parser is built per server: `--health-check` exists only when a
//! health check is configured, `--skip-startup-hook` only when a startup
//! hook is.

use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;

/// Parsed lifecycle flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run the health check and exit
    pub health_check: bool,
    /// Skip the startup hook before serving
    pub skip_startup_hook: bool,
}

/// Build the argument parser for a server
pub fn build_command(
    name: &str,
    description: &str,
    version: &str,
    has_health_check: bool,
    has_startup_hook: bool,
) -> Command {
    let mut command = Command::new(name.to_string())
        .about(description.to_string())
        .version(version.to_string());

    if has_health_check {
        command = command.arg(
            Arg::new("health-check")
                .long("health-check")
                .action(ArgAction::SetTrue)
                .help("Run health check and exit"),
        );
    }

    if has_startup_hook {
        command = command.arg(
            Arg::new("skip-startup-hook")
                .long("skip-startup-hook")
                .action(ArgAction::SetTrue)
                .help("Skip startup hook execution"),
        );
    }

    command
}

/// Parse arguments into run options
pub fn parse_options<I, T>(command: Command, args: I) -> Result<RunOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command.try_get_matches_from(args)?;

    let flag = |id: &str| {
        matches
            .try_get_one::<bool>(id)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    };

    Ok(RunOptions {
        health_check: flag("health-check"),
        skip_startup_hook: flag("skip-startup-hook"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(health: bool, startup: bool) -> Command {
        build_command("test", "Test server", "0.1.0", health, startup)
    }

    #[test]
    fn test_parse_args_no_hooks() {
        let options = parse_options(command(false, false), ["test"]).unwrap();
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn test_flags_rejected_without_hooks() {
        assert!(parse_options(command(false, false), ["test", "--health-check"]).is_err());
        assert!(parse_options(command(false, false), ["test", "--skip-startup-hook"]).is_err());
    }

    #[test]
    fn test_parse_args_with_health_check() {
        let options = parse_options(command(true, false), ["test", "--health-check"]).unwrap();
        assert!(options.health_check);
        assert!(!options.skip_startup_hook);
    }

    #[test]
    fn test_parse_args_with_startup_hook() {
        let options =
            parse_options(command(false, true), ["test", "--skip-startup-hook"]).unwrap();
        assert!(options.skip_startup_hook);
        assert!(!options.health_check);
    }

    #[test]
    fn test_help_mentions_description() {
        let help = command(true, true).render_help().to_string();
        assert!(help.contains("Test server"));
        assert!(help.contains("--health-check"));
        assert!(help.contains("--skip-startup-hook"));
    }
}
