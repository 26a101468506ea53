use crate::aggregate::Aggregator;
use crate::config::DigestConfig;
use crate::error::DigestError;
use crate::git::GitRepo;
use crate::model::{DigestReport, Window};
use crate::notify::{deliver, CommandSink};
use crate::render::{render, render_json};
use crate::util::warn;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

pub fn exec(config: DigestConfig) -> anyhow::Result<()> {
    let paths = config
        .source
        .resolve()
        .context("Failed to resolve repositories")?;

    if paths.is_empty() {
        eprintln!("No repositories found to scan.");
        return Ok(());
    }

    let window = Window::new(config.window_hours, Utc::now());
    let report = scan(&paths, &window);

    if config.json {
        println!("{}", render_json(&report, window.now).context("Failed to serialize digest")?);
        return Ok(());
    }

    let payload = render(&report, config.format, config.color);
    println!("{payload}");

    if let Some(program) = &config.notifier {
        deliver(&CommandSink::new(program), &payload);
    }

    Ok(())
}

/// Inspect and query each path in order. Problems with a single repository
/// are reported as warnings and never stop the scan.
pub fn scan(paths: &[PathBuf], window: &Window) -> DigestReport {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut aggregator = Aggregator::new(window.hours);
    for path in paths {
        pb.set_message(format!("Scanning {}", path.display()));

        let repo = match GitRepo::open(path) {
            Ok(repo) => repo,
            Err(err @ DigestError::NotADirectory(_)) => {
                pb.suspend(|| warn(format!("skipping {}: {err}", path.display())));
                aggregator.skip();
                continue;
            }
            Err(err) => {
                tracing::debug!("open {} failed: {err}", path.display());
                pb.suspend(|| warn(format!("skipping {}: not a git repository", path.display())));
                aggregator.skip();
                continue;
            }
        };

        let info = repo.info();
        let commits = repo.recent_commits(window).unwrap_or_else(|err| {
            tracing::debug!("history query for {} failed: {err}", repo.path().display());
            Vec::new()
        });
        tracing::debug!(
            repo = %repo.path().display(),
            branch = %info.branch_label,
            commits = commits.len(),
            "scanned repository"
        );

        aggregator.add(repo.path().to_path_buf(), info, commits);
        pb.inc(1);
    }

    pb.finish_and_clear();
    aggregator.finish()
}
