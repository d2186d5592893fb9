// report.rs - Final summary report
// The report reads counts straight from the artifact files by naming
// convention, independent of what the stages reported. A missing artifact
// is zero results, never an error.

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::textops::count_lines;

/// Artifact files and their report labels, in table order.
const REPORT_ROWS: [(&str, &str); 7] = [
    ("subfinder.txt", "Subfinder Subdomains"),
    ("assetfinder.txt", "Assetfinder Subdomains"),
    ("amass.txt", "Amass Subdomains"),
    ("subs_final.txt", "Total Unique Subdomains"),
    ("httpx_live.txt", "Live Hosts"),
    ("nuclei_targets.txt", "Nuclei Targets"),
    ("nuclei_results.txt", "Vulnerabilities Found"),
];

/// Write `{domain}_report.txt` summarizing the line count of every
/// artifact, echoing each summary line to stdout.
pub fn generate_report(domain: &str, output_dir: &Path) -> Result<PathBuf> {
    let report_file = output_dir.join(format!("{}_report.txt", domain));

    println!("{}", "[*] Generating summary report...".cyan());
    println!();

    let file = File::create(&report_file)
        .context(format!("Failed to create report: {}", report_file.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer, "  BUG BOUNTY RECON REPORT - {}", domain)?;
    writeln!(
        writer,
        "  Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer)?;
    writeln!(writer, "RESULTS SUMMARY")?;
    writeln!(writer, "{}", "-".repeat(40))?;

    for (suffix, label) in REPORT_ROWS {
        let path = output_dir.join(format!("{}_{}", domain, suffix));
        let count = count_lines(&path)?;
        writeln!(writer, "{}: {}", label, count)?;
        println!("    {}: {}", label, count);
    }

    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writer.flush()?;

    println!();
    println!(
        "{}",
        format!("[+] Report saved to: {}", report_file.display()).green()
    );

    Ok(report_file)
}
