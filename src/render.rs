use crate::error::Result;
use crate::model::{CommitRecord, DigestOutput, DigestReport, ScanResult, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;

const PLAIN_RULE_WIDTH: usize = 40;
const MARKUP_RULE_WIDTH: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal text, optionally styled
    Plain,
    /// Bold/code spans for chat renderers
    #[value(alias = "telegram")]
    LiteMarkup,
}

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Render `report` as text. `color` only affects [`OutputFormat::Plain`].
///
/// The result never starts with a blank line and has no trailing newline.
pub fn render(report: &DigestReport, format: OutputFormat, color: bool) -> String {
    if report.is_empty() {
        return format!(
            "No commits found in the last {}h across {} repo(s).",
            report.window_hours, report.scanned_repo_count
        );
    }

    let mut out = String::new();
    for result in &report.results {
        match format {
            OutputFormat::Plain => plain_section(&mut out, result, color),
            OutputFormat::LiteMarkup => markup_section(&mut out, result),
        }
    }

    let closing = match format {
        OutputFormat::Plain => rule(PLAIN_RULE_WIDTH),
        OutputFormat::LiteMarkup => rule(MARKUP_RULE_WIDTH),
    };
    out.push_str(&closing);
    out.push('\n');
    out.push_str(&format!(
        "Total: {} commit(s) across {} repo(s) (last {}h)",
        report.total_commits, report.active_repo_count, report.window_hours
    ));

    match out.strip_prefix('\n') {
        Some(rest) => rest.to_string(),
        None => out,
    }
}

fn plain_section(out: &mut String, result: &ScanResult, color: bool) {
    let rule = rule(PLAIN_RULE_WIDTH);
    let header = format!(
        "{} {}",
        style(&result.info.display_name).bold().force_styling(color),
        style(format!("({})", result.info.branch_label)).dim().force_styling(color)
    );

    out.push('\n');
    out.push_str(&format!("{rule}\n{header}\n{rule}\n"));
    for commit in &result.commits {
        out.push_str(&format!(
            "{}  {}, {}\n    {}\n\n",
            commit.short_hash,
            commit.author,
            style(&commit.relative_time).dim().force_styling(color),
            commit.subject
        ));
    }
}

fn markup_section(out: &mut String, result: &ScanResult) {
    out.push('\n');
    out.push_str(&format!(
        "*{}* ({})\n{}\n",
        result.info.display_name,
        result.info.branch_label,
        rule(MARKUP_RULE_WIDTH)
    ));
    for CommitRecord { short_hash, author, relative_time, subject } in &result.commits {
        out.push_str(&format!("`{short_hash}` {author}, {relative_time}\n{subject}\n\n"));
    }
}

pub fn render_json(report: &DigestReport, generated_at: DateTime<Utc>) -> Result<String> {
    let output = DigestOutput {
        version: SCHEMA_VERSION,
        generated_at,
        window_hours: report.window_hours,
        scanned_repo_count: report.scanned_repo_count,
        active_repo_count: report.active_repo_count,
        total_commits: report.total_commits,
        repositories: report.results.clone(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
