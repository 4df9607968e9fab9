use std::process::Command;

// Embeds the short commit hash in `slipline --version`.
fn main() {
    let sha = commit_sha().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=SLIPLINE_BUILD_SHA={sha}");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}

fn commit_sha() -> Option<String> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").ok()?;
    let out = Command::new("git")
        .args(["-C", &format!("{manifest_dir}/.."), "describe", "--always", "--dirty"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
