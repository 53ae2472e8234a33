fn main() {
    // Re-run if git HEAD changes (new commits, checkouts, etc.)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"])
        .is_some_and(|o| o.status.success());

    println!("cargo:rustc-env=IMGEDIT_GIT_HASH={hash}");
    println!("cargo:rustc-env=IMGEDIT_ON_RELEASE_TAG={on_tag}");
}

fn git(args: &[&str]) -> Option<std::process::Output> {
    std::process::Command::new("git").args(args).output().ok()
}
