// scan.rs - Recon pipeline stages
// Six stages, strictly sequential: each stage runs one external tool and
// leaves a `{domain}_{suffix}.txt` artifact in the run directory. Stages 2
// and 3 additionally fold the new tool's output into the accumulated
// subdomain list, so reordering the chain would change its semantics.

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::run_command;
use crate::textops::{count_lines, extract_first_field, merge_unique};

/// Strip a leading `http://` or `https://` (any casing) and every `/` from
/// user-supplied domain input. Idempotent.
pub fn normalize_domain(input: &str) -> String {
    let scheme = Regex::new(r"(?i)^https?://").unwrap();
    scheme.replace(input.trim(), "").replace('/', "")
}

/// Create the per-run output directory `recon_{domain}_{timestamp}`.
/// Day-second timestamp granularity makes collisions within a session
/// practically impossible; creation is idempotent regardless.
pub fn create_output_dir(domain: &str) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let output_dir = PathBuf::from(format!("recon_{}_{}", domain, timestamp));
    fs::create_dir_all(&output_dir)
        .context(format!("Failed to create output directory: {}", output_dir.display()))?;
    println!("{}", format!("[*] Output directory: {}", output_dir.display()).cyan());
    println!();
    Ok(output_dir)
}

/// Stage 1: subfinder with all sources enabled.
pub fn subfinder_scan(domain: &str, output_dir: &Path) -> Result<PathBuf> {
    let output_file = output_dir.join(format!("{}_subfinder.txt", domain));
    let command = format!("subfinder -d {} -all -o {}", domain, output_file.display());

    if run_command(&command, "Running Subfinder") {
        let count = count_lines(&output_file)?;
        println!("{}", format!("    [+] Subfinder found {} subdomains", count).green());
        println!();
    }

    Ok(output_file)
}

/// Stage 2: assetfinder, then fold its output into the subfinder results.
/// Assetfinder only writes to stdout, so the command string redirects.
pub fn assetfinder_scan(domain: &str, output_dir: &Path, subfinder_file: &Path) -> Result<PathBuf> {
    let assetfinder_file = output_dir.join(format!("{}_assetfinder.txt", domain));
    let merged_file = output_dir.join(format!("{}_subs_raw.txt", domain));

    let command = format!(
        "assetfinder --subs-only {} > {}",
        domain,
        assetfinder_file.display()
    );
    if run_command(&command, "Running Assetfinder") {
        let count = count_lines(&assetfinder_file)?;
        println!("{}", format!("    [+] Assetfinder found {} subdomains", count).green());
        println!();
    }

    println!("{}", "[*] Merging results...".cyan());
    let count = merge_unique(&[subfinder_file, &assetfinder_file], &merged_file)?;
    println!("{}", format!("    [+] Combined unique subdomains: {}", count).green());
    println!();

    Ok(merged_file)
}

/// Stage 3: amass in passive mode, then fold into the final subdomain list.
pub fn amass_scan(domain: &str, output_dir: &Path, raw_subs_file: &Path) -> Result<PathBuf> {
    let amass_file = output_dir.join(format!("{}_amass.txt", domain));
    let final_subs_file = output_dir.join(format!("{}_subs_final.txt", domain));

    let command = format!("amass enum -passive -d {} -o {}", domain, amass_file.display());
    if run_command(&command, "Running Amass (passive mode)") {
        let count = count_lines(&amass_file)?;
        println!("{}", format!("    [+] Amass found {} subdomains", count).green());
        println!();
    }

    println!("{}", "[*] Creating final subdomain list...".cyan());
    let count = merge_unique(&[raw_subs_file, &amass_file], &final_subs_file)?;
    println!("{}", format!("    [+] Total unique subdomains: {}", count).green().bold());
    println!();

    Ok(final_subs_file)
}

/// Stage 4: probe the deduplicated subdomain list with httpx, keeping only
/// a fixed allow-list of status codes and annotating each live host with
/// status code, page title, and detected technology.
pub fn httpx_probe(domain: &str, output_dir: &Path, subs_file: &Path) -> Result<PathBuf> {
    let httpx_file = output_dir.join(format!("{}_httpx_live.txt", domain));

    let command = format!(
        "httpx -l {} -silent -status-code -title -tech-detect -mc 200,301,302,403,401,500 -o {}",
        subs_file.display(),
        httpx_file.display()
    );
    if run_command(&command, "Probing live hosts with httpx") {
        let count = count_lines(&httpx_file)?;
        println!("{}", format!("    [+] Found {} live hosts", count).green());
        println!();
    }

    Ok(httpx_file)
}

/// Stage 5: project the URL column out of the annotated httpx output so
/// nuclei gets a plain target list.
pub fn prepare_nuclei_targets(domain: &str, output_dir: &Path, httpx_file: &Path) -> Result<PathBuf> {
    let targets_file = output_dir.join(format!("{}_nuclei_targets.txt", domain));

    println!("{}", "[*] Extracting URLs for Nuclei...".cyan());
    let count = extract_first_field(httpx_file, &targets_file)?;
    println!("{}", format!("    [+] Prepared {} targets for Nuclei", count).green());
    println!();

    Ok(targets_file)
}

/// Stage 6: nuclei over the prepared targets, informational findings
/// filtered out by the severity allow-list.
pub fn nuclei_scan(domain: &str, output_dir: &Path, targets_file: &Path) -> Result<PathBuf> {
    let nuclei_file = output_dir.join(format!("{}_nuclei_results.txt", domain));

    let command = format!(
        "nuclei -l {} -severity low,medium,high,critical -o {} -silent",
        targets_file.display(),
        nuclei_file.display()
    );
    if run_command(&command, "Running Nuclei vulnerability scanner") {
        let count = count_lines(&nuclei_file)?;
        println!("{}", format!("    [+] Nuclei found {} potential vulnerabilities", count).green());
        println!();
    }

    Ok(nuclei_file)
}
