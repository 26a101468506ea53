use crate::capability::{probe, Availability};
use crate::cli::Cli;
use crate::error::{DigestError, Result};
use crate::render::OutputFormat;
use crate::resolve::RepoSource;
use crate::util::warn;
use std::path::PathBuf;

/// Validated settings for one run. Building it performs every fatal check, so
/// nothing is scanned with a bad configuration.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub source: RepoSource,
    pub window_hours: u32,
    pub format: OutputFormat,
    pub color: bool,
    pub json: bool,
    /// Resolved notification program, present only with `--notify`.
    pub notifier: Option<PathBuf>,
}

impl DigestConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let source = match (&cli.repos, &cli.root) {
            (Some(list), root) => {
                if root.is_some() {
                    warn("both --repos and --root given; using --repos");
                }
                RepoSource::Explicit(list.clone())
            }
            (None, Some(root)) => {
                if !root.is_dir() {
                    return Err(DigestError::Config(format!(
                        "root directory does not exist or is not a directory: {}",
                        root.display()
                    )));
                }
                RepoSource::Root(root.clone())
            }
            (None, None) => RepoSource::CurrentDir(std::env::current_dir()?),
        };

        let notifier = if cli.notify {
            match probe(&cli.notify_bin) {
                Availability::Available(path) => Some(path),
                Availability::Missing => return Err(DigestError::MissingTool(cli.notify_bin.clone())),
            }
        } else {
            None
        };

        // Notification sinks get markup, never terminal escapes.
        let (format, color) = if cli.notify {
            (OutputFormat::LiteMarkup, false)
        } else {
            (cli.format, !cli.no_color && console::colors_enabled())
        };

        Ok(Self {
            source,
            window_hours: cli.hours,
            format,
            color,
            json: cli.json,
            notifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gdigest").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_current_directory() {
        let config = DigestConfig::from_cli(&parse(&[])).unwrap();
        assert_eq!(
            config.source,
            RepoSource::CurrentDir(std::env::current_dir().unwrap())
        );
        assert_eq!(config.window_hours, 24);
        assert_eq!(config.format, OutputFormat::Plain);
        assert!(config.notifier.is_none());
    }

    #[test]
    fn explicit_list_wins_over_root() {
        let config = DigestConfig::from_cli(&parse(&["--repos", "a,b", "--root", "/nonexistent"])).unwrap();
        assert_eq!(config.source, RepoSource::Explicit("a,b".to_string()));
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        let err = DigestConfig::from_cli(&parse(&["--root", missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn no_color_disables_styling() {
        let config = DigestConfig::from_cli(&parse(&["--no-color"])).unwrap();
        assert!(!config.color);
    }

    #[test]
    fn notify_requires_the_tool() {
        let err = DigestConfig::from_cli(&parse(&["--notify", "--notify-bin", "/no/such/notifier"])).unwrap_err();
        assert!(matches!(err, DigestError::MissingTool(_)));
    }

    #[cfg(unix)]
    #[test]
    fn notify_forces_markup_without_color() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let tool = dir.path().join("notifier");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cli = parse(&["--notify", "--notify-bin", tool.to_str().unwrap(), "--format", "plain"]);
        let config = DigestConfig::from_cli(&cli).unwrap();
        assert_eq!(config.format, OutputFormat::LiteMarkup);
        assert!(!config.color);
        assert_eq!(config.notifier, Some(tool));
    }
}
