use ftensure_core::domain::{SyncError, SyncOutcome, UploadReason};
use serde_json::{json, Value};

use crate::commands::ensure::EnsureCommand;

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn outcome(&self, cmd: &EnsureCommand, outcome: &SyncOutcome);
    fn failure(&self, cmd: &EnsureCommand, err: &SyncError);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl HumanFormatter {
    fn outcome_lines(cmd: &EnsureCommand, outcome: &SyncOutcome) -> Vec<String> {
        match outcome {
            SyncOutcome::UpToDate { digest } => vec![
                format!("\u{2713} Up to date: {}", cmd.remote_path),
                format!("  sha256 {digest}"),
            ],
            SyncOutcome::Uploaded {
                digest,
                previous,
                reason,
                ..
            } => {
                let mut lines = vec![
                    format!(
                        "\u{2713} Uploaded {} to {}",
                        cmd.local_path.display(),
                        cmd.remote_path
                    ),
                    format!("  sha256 {digest}"),
                ];
                match (reason, previous) {
                    (UploadReason::DigestMismatch, Some(previous)) => {
                        lines.push(format!("  replaced {previous}"));
                    }
                    _ => lines.push("  remote file did not exist".to_string()),
                }
                lines
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn outcome(&self, cmd: &EnsureCommand, outcome: &SyncOutcome) {
        for line in Self::outcome_lines(cmd, outcome) {
            println!("{line}");
        }
    }

    fn failure(&self, _cmd: &EnsureCommand, err: &SyncError) {
        eprintln!("\u{2717} Error ({}): {}", err.kind(), err);
    }
}

/// JSON output formatter
///
/// Prints exactly one object per run on stdout.
pub struct JsonFormatter;

impl JsonFormatter {
    fn outcome_value(cmd: &EnsureCommand, outcome: &SyncOutcome) -> Value {
        let mut value = serde_json::to_value(outcome).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut value {
            map.insert("success".into(), Value::Bool(true));
            map.insert("remote_path".into(), Value::String(cmd.remote_path.clone()));
        }
        value
    }

    fn failure_value(cmd: &EnsureCommand, err: &SyncError) -> Value {
        json!({
            "success": false,
            "error_kind": err.kind(),
            "error": err.to_string(),
            "exit_code": err.exit_code(),
            "remote_path": cmd.remote_path,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn outcome(&self, cmd: &EnsureCommand, outcome: &SyncOutcome) {
        println!("{}", Self::outcome_value(cmd, outcome));
    }

    fn failure(&self, cmd: &EnsureCommand, err: &SyncError) {
        println!("{}", Self::failure_value(cmd, err));
    }
}

pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}
