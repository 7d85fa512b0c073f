//! Build script: embeds the package version plus the git commit, if any.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let package = env!("CARGO_PKG_VERSION");
    let version = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(commit) => {
            let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
            format!("{} ({}{})", package, commit, if dirty { "-dirty" } else { "" })
        }
        None => package.to_string(),
    };

    println!("cargo:rustc-env=SHELFVIEW_VERSION={}", version);
}

/// Run git and return trimmed stdout, or `None` if git is unavailable or fails.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
