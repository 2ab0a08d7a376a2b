use serde_json::{json, Value};
use std::process::Command;

/// Build metadata printed by `planar report`.
pub fn build_info() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "cli_version": env!("CARGO_PKG_VERSION"),
        "planar_version": planar::VERSION,
    })
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}
