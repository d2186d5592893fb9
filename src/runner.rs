// runner.rs - Shell command execution

use colored::*;
use std::process::Command;

/// Run a shell command, printing the description and the literal command
/// beforehand. The command string goes through `sh -c` so redirection and
/// pipes embedded in it work.
///
/// Output is captured, not streamed. A non-zero exit with stderr content is
/// printed as a warning but still counts as success: recon tools routinely
/// exit non-zero on partial results, and the pipeline tolerates a missing
/// output file downstream (counted as zero). Returns false only when the
/// shell itself could not be spawned.
pub fn run_command(command: &str, description: &str) -> bool {
    println!("{}", format!("[*] {}...", description).cyan());
    println!("    Command: {}", command.dimmed());
    println!();

    match Command::new("sh").arg("-c").arg(command).output() {
        Ok(output) => {
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    println!("{}", format!("    [!] Warning: {}", stderr).yellow());
                }
            }
            true
        }
        Err(e) => {
            println!("{}", format!("    [X] Error: {}", e).red());
            false
        }
    }
}
