// tools.rs - Required tool verification
// Every stage of the pipeline shells out to one of these binaries, so a
// missing tool is a fatal precondition failure: the run must abort before
// any stage starts.

use colored::*;
use std::ffi::OsStr;
use std::path::PathBuf;

/// External tools the pipeline invokes, in pipeline order.
pub const REQUIRED_TOOLS: [&str; 5] = ["subfinder", "assetfinder", "amass", "httpx", "nuclei"];

/// Search the directories of a PATH-style value for an executable binary.
///
/// Takes the PATH value as a parameter rather than reading the process
/// environment, so callers control exactly which directories are searched.
pub fn find_in_path(binary: &str, path_var: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(path_var) {
        let candidate = dir.join(binary);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &std::path::Path) -> bool {
    true
}

/// Check that every required tool is present on the given PATH.
///
/// Prints a per-tool status line and, on failure, the consolidated list of
/// missing tools. Returns true only if all five are present.
pub fn check_tools(path_var: &OsStr) -> bool {
    let mut missing: Vec<&str> = Vec::new();

    println!("{}", "[*] Checking required tools...".cyan());
    for tool in REQUIRED_TOOLS {
        match find_in_path(tool, path_var) {
            Some(path) => {
                println!(
                    "    {} {} {}",
                    "[+]".green(),
                    tool.green(),
                    format!("→ {}", path.display()).dimmed()
                );
            }
            None => {
                missing.push(tool);
                println!("    {} {} - NOT FOUND", "[X]".red(), tool.red());
            }
        }
    }

    if !missing.is_empty() {
        println!();
        println!(
            "{}",
            format!("[!] Missing tools: {}", missing.join(", ")).yellow().bold()
        );
        println!(
            "{}",
            "[!] Please install missing tools before running.".yellow()
        );
        return false;
    }

    println!("{}", "[+] All tools installed!".green().bold());
    println!();
    true
}
