use crate::config::DigestConfig;
use crate::notify::DEFAULT_NOTIFY_BIN;
use crate::render::OutputFormat;
use crate::util::warn;
use anyhow::Result;
use clap::{Command, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gdigest")]
#[command(about = "Digest of recent commits across git repositories")]
#[command(version)]
pub struct Cli {
    #[arg(
        short = 'H',
        long,
        env = "GDIGEST_HOURS",
        default_value_t = 24,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Look back this many hours"
    )]
    pub hours: u32,

    #[arg(short, long, env = "GDIGEST_REPOS", help = "Comma-separated repository paths to scan")]
    pub repos: Option<String>,

    #[arg(
        short = 'd',
        long,
        env = "GDIGEST_ROOT",
        help = "Directory to search for repositories (up to 3 levels deep)"
    )]
    pub root: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_enum,
        env = "GDIGEST_FORMAT",
        default_value_t = OutputFormat::Plain,
        help = "Output format"
    )]
    pub format: OutputFormat,

    #[arg(long, conflicts_with = "json", help = "Also send the digest through the notification tool")]
    pub notify: bool,

    #[arg(
        long,
        env = "GDIGEST_NOTIFY_BIN",
        default_value = DEFAULT_NOTIFY_BIN,
        help = "Notification program used by --notify"
    )]
    pub notify_bin: String,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

/// Command line with unusable tokens removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Triage {
    pub args: Vec<OsString>,
    pub warnings: Vec<String>,
}

/// Whether the option named by `token` exists, and if so whether it takes a
/// separate value token.
fn lookup(cmd: &Command, token: &str) -> Option<bool> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        cmd.get_arguments()
            .find(|arg| {
                arg.get_long() == Some(name)
                    || arg.get_all_aliases().is_some_and(|aliases| aliases.contains(&name))
            })
            .map(|arg| arg.get_action().takes_values() && !inline_value)
    } else {
        let mut chars = token.strip_prefix('-')?.chars();
        let short = chars.next()?;
        let attached_value = chars.next().is_some();
        cmd.get_arguments()
            .find(|arg| arg.get_short() == Some(short))
            .map(|arg| arg.get_action().takes_values() && !attached_value)
    }
}

/// Split `raw` (program name first) into arguments clap understands and
/// warnings for everything else: unknown options and positionals.
pub fn triage<I>(raw: I) -> Triage
where
    I: IntoIterator<Item = OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut raw = raw.into_iter();
    let mut triage = Triage {
        args: raw.next().into_iter().collect(),
        warnings: Vec::new(),
    };

    let mut expecting_value = false;
    let mut after_separator = false;
    for arg in raw {
        if expecting_value {
            triage.args.push(arg);
            expecting_value = false;
            continue;
        }

        let text = arg.to_string_lossy().into_owned();
        if !after_separator && text == "--" {
            after_separator = true;
            continue;
        }
        if after_separator || text == "-" || !text.starts_with('-') {
            triage
                .warnings
                .push(format!("ignoring unrecognized argument '{text}'"));
            continue;
        }

        match lookup(&cmd, &text) {
            Some(takes_value) => {
                triage.args.push(arg);
                expecting_value = takes_value;
            }
            None => triage.warnings.push(format!("ignoring unknown option '{text}'")),
        }
    }

    triage
}

impl Cli {
    /// Parse the process arguments, warning about anything that is ignored.
    pub fn parse() -> Self {
        let triage = triage(std::env::args_os());
        for warning in &triage.warnings {
            warn(warning);
        }
        <Self as Parser>::parse_from(triage.args)
    }

    pub fn execute(self) -> Result<()> {
        let config = DigestConfig::from_cli(&self)?;
        crate::digest::exec(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(args: &[&str]) -> Triage {
        triage(std::iter::once("gdigest").chain(args.iter().copied()).map(OsString::from))
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn known_options_pass_through() {
        let t = run(&["--hours", "48", "-f", "lite-markup", "--no-color", "--root=/src"]);
        assert_eq!(
            t.args,
            os(&["gdigest", "--hours", "48", "-f", "lite-markup", "--no-color", "--root=/src"])
        );
        assert!(t.warnings.is_empty());
    }

    #[test]
    fn unknown_options_and_positionals_are_dropped() {
        let t = run(&["--verbose", "--hours", "6", "stray", "-x"]);
        assert_eq!(t.args, os(&["gdigest", "--hours", "6"]));
        assert_eq!(
            t.warnings,
            vec![
                "ignoring unknown option '--verbose'".to_string(),
                "ignoring unrecognized argument 'stray'".to_string(),
                "ignoring unknown option '-x'".to_string(),
            ]
        );
    }

    #[test]
    fn option_values_are_never_misread() {
        let t = run(&["--repos", "-odd-name", "-H", "abc"]);
        assert_eq!(t.args, os(&["gdigest", "--repos", "-odd-name", "-H", "abc"]));
        assert!(t.warnings.is_empty());
    }

    #[test]
    fn help_and_version_are_known() {
        assert!(run(&["--help"]).warnings.is_empty());
        assert!(run(&["-V"]).warnings.is_empty());
    }

    #[test]
    fn clap_rejects_bad_window_and_format() {
        assert!(Cli::try_parse_from(["gdigest", "--hours", "0"]).is_err());
        assert!(Cli::try_parse_from(["gdigest", "--hours", "abc"]).is_err());
        assert!(Cli::try_parse_from(["gdigest", "--hours", "-3"]).is_err());
        assert!(Cli::try_parse_from(["gdigest", "--format", "html"]).is_err());
    }

    #[test]
    fn telegram_is_an_alias_for_lite_markup() {
        let cli = Cli::try_parse_from(["gdigest", "--format", "telegram"]).unwrap();
        assert_eq!(cli.format, OutputFormat::LiteMarkup);
    }

    #[test]
    fn notify_conflicts_with_json() {
        assert!(Cli::try_parse_from(["gdigest", "--notify", "--json"]).is_err());
    }
}
