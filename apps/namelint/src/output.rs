//! Output rendering for lint runs, settings and live notices.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-file results and a top-level summary.

use crate::models::{LintOutcome, LintReport, Notice};
use crate::notice::Notifier;
use crate::settings::LinterSettings;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Print the notices and summary of a lint run.
///
/// Human output shows one line per notice; clean files are not listed.
pub fn print_report(report: &LintReport, notices: &[Notice], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report, notices))
                .unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for n in notices {
                println!("{}", render_notice(n, color));
            }
            let summary = format!(
                "— Summary — renamed={} failed={} files={}",
                report.summary.renamed, report.summary.failed, report.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print persisted settings.
pub fn print_settings(settings: &LinterSettings, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(settings).unwrap_or_default()
        ),
        _ => {
            let flag = |on: bool| if on { "on" } else { "off" };
            println!("autoLintOnCreate: {}", flag(settings.auto_lint_on_create));
            println!("autoLintOnRename: {}", flag(settings.auto_lint_on_rename));
        }
    }
}

fn render_notice(n: &Notice, color: bool) -> String {
    match (n, color) {
        (Notice::Renamed { .. }, true) => format!("{} {}", "✔".green(), n),
        (Notice::Renamed { .. }, false) => format!("✔ {}", n),
        (Notice::RenameFailed { .. }, true) => format!("{} {}", "✖".red(), n.to_string().red()),
        (Notice::RenameFailed { .. }, false) => format!("✖ {}", n),
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &LintReport, notices: &[Notice]) -> JsonVal {
    let results: Vec<JsonVal> = report
        .results
        .iter()
        .filter(|r| !matches!(r, LintOutcome::Unchanged { .. }))
        .map(|r| serde_json::to_value(r).unwrap_or(JsonVal::Null))
        .collect();
    let messages: Vec<String> = notices.iter().map(|n| n.to_string()).collect();
    json!({
        "results": results,
        "notices": messages,
        "summary": report.summary,
    })
}

/// Prints each notice as soon as it arrives. Used by `watch`.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    output: String,
}

impl ConsoleNotifier {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match self.output.as_str() {
            "json" => println!("{}", serde_json::to_string(&notice).unwrap_or_default()),
            _ => {
                let line = render_notice(&notice, use_colors(&self.output));
                if notice.is_failure() {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_report_json_shape() {
        let report = LintReport::from_outcomes(vec![
            LintOutcome::Unchanged { path: "ok.md".into() },
            LintOutcome::Renamed {
                from: "a#.md".into(),
                to: "a.md".into(),
            },
        ]);
        let notices = vec![Notice::Renamed {
            old: "a#".into(),
            new: "a".into(),
        }];
        let out = compose_report_json(&report, &notices);
        assert_eq!(out["summary"]["files"], 2);
        assert_eq!(out["summary"]["renamed"], 1);
        // Unchanged files are not listed
        assert_eq!(out["results"].as_array().unwrap().len(), 1);
        assert_eq!(out["results"][0]["status"], "renamed");
        assert_eq!(out["results"][0]["to"], "a.md");
        assert_eq!(out["notices"][0], "a# renamed to a");
    }

    #[test]
    fn test_render_notice_plain() {
        let n = Notice::RenameFailed {
            old: "x:y".into(),
            new: "xy".into(),
        };
        assert_eq!(
            render_notice(&n, false),
            "✖ Unable to rename x:y to xy. There probably already exists a file with this name"
        );
    }
}
