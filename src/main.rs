// main.rs - ReconPipe - Bug Bounty Recon Pipeline
// Purpose: Sequential recon automation: subfinder -> assetfinder -> amass -> httpx -> nuclei
// License: MIT

use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use reconpipe::report::generate_report;
use reconpipe::scan::{
    amass_scan, assetfinder_scan, create_output_dir, httpx_probe, normalize_domain, nuclei_scan,
    prepare_nuclei_targets, subfinder_scan,
};
use reconpipe::tools::check_tools;

fn main() -> Result<()> {
    ctrlc::set_handler(|| {
        println!();
        println!();
        println!("{}", "[!] Interrupted. Exiting...".yellow().bold());
        std::process::exit(0);
    })?;

    print_banner();

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    if !check_tools(&path_var) {
        std::process::exit(1);
    }

    println!("{}", "-".repeat(60));
    let domain = prompt("[?] Enter target domain (e.g., example.com): ")?;
    let domain = normalize_domain(&domain);

    if domain.is_empty() {
        eprintln!("{}", "[!] Error: Domain cannot be empty!".red().bold());
        std::process::exit(1);
    }

    println!();
    println!("{}", format!("[*] Target: {}", domain).cyan().bold());
    println!("{}", "-".repeat(60));
    println!();

    let confirm = prompt("[?] Start recon? (y/n): ")?;
    if !is_affirmative(&confirm) {
        println!("{}", "[!] Aborted.".yellow());
        return Ok(());
    }

    println!();
    print_section("STARTING RECON PIPELINE");
    println!();

    let output_dir = create_output_dir(&domain)?;

    print_step(1, "SUBFINDER");
    let subfinder_file = subfinder_scan(&domain, &output_dir)?;

    print_step(2, "ASSETFINDER");
    let raw_subs_file = assetfinder_scan(&domain, &output_dir, &subfinder_file)?;

    print_step(3, "AMASS");
    let final_subs_file = amass_scan(&domain, &output_dir, &raw_subs_file)?;

    print_step(4, "HTTPX");
    let httpx_file = httpx_probe(&domain, &output_dir, &final_subs_file)?;

    print_step(5, "PREPARE TARGETS");
    let targets_file = prepare_nuclei_targets(&domain, &output_dir, &httpx_file)?;

    print_step(6, "NUCLEI");
    nuclei_scan(&domain, &output_dir, &targets_file)?;

    print_section("GENERATING REPORT");
    generate_report(&domain, &output_dir)?;

    println!();
    print_section("RECON COMPLETE!");
    println!();
    println!(
        "{}",
        format!("[*] Results saved in: {}/", output_dir.display()).green().bold()
    );
    println!();
    println!(
        "{}",
        "[!] Only scan targets you have permission to test!".yellow().bold()
    );
    println!();

    Ok(())
}

/// Print a prompt and read one trimmed line from stdin. EOF yields an
/// empty string, which the caller treats the same as an empty answer.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message.cyan().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Only an explicit `y` (any casing) starts the scan.
fn is_affirmative(input: &str) -> bool {
    input.trim().to_lowercase() == "y"
}

fn print_banner() {
    println!("{}", "═".repeat(60).cyan().bold());
    println!("{}", "           BUG BOUNTY RECON AUTOMATION".cyan().bold());
    println!("{}", "  subfinder -> assetfinder -> amass -> httpx -> nuclei".white());
    println!("{}", "═".repeat(60).cyan().bold());
    println!();
}

fn print_section(title: &str) {
    println!("{}", "═".repeat(60).yellow().bold());
    println!("{}", format!("           {}", title).yellow().bold());
    println!("{}", "═".repeat(60).yellow().bold());
}

fn print_step(step: u8, name: &str) {
    println!("{}", format!("[STEP {}/6] {}", step, name).magenta().bold());
    println!("{}", "-".repeat(40));
}
