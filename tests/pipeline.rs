// End-to-end pipeline tests. Each test runs the compiled binary in a
// scratch working directory with shell-script stand-ins for the five
// external tools placed first on PATH.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Shell snippet that extracts the argument following `-o` into `$out`.
const PARSE_OUT: &str = r#"out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
"#;

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Stand-ins for a normal run: three subdomain tools emitting three
/// disjoint lines each, httpx emitting `live_lines`, nuclei emitting
/// `finding_lines`.
fn install_fake_tools(bin_dir: &Path, live_lines: &str, finding_lines: &str) {
    write_script(
        bin_dir,
        "subfinder",
        &format!(
            "{}printf 'a1.example.com\\na2.example.com\\na3.example.com\\n' > \"$out\"\n",
            PARSE_OUT
        ),
    );
    // assetfinder emits to stdout; the pipeline redirects it
    write_script(
        bin_dir,
        "assetfinder",
        "printf 'b1.example.com\\nb2.example.com\\nb3.example.com\\n'\n",
    );
    write_script(
        bin_dir,
        "amass",
        &format!(
            "{}printf 'c1.example.com\\nc2.example.com\\nc3.example.com\\n' > \"$out\"\n",
            PARSE_OUT
        ),
    );
    write_script(
        bin_dir,
        "httpx",
        &format!("{}printf '{}' > \"$out\"\n", PARSE_OUT, live_lines),
    );
    write_script(
        bin_dir,
        "nuclei",
        &format!("{}printf '{}' > \"$out\"\n", PARSE_OUT, finding_lines),
    );
}

fn run_reconpipe(bin_dir: &Path, workdir: &Path, stdin_data: &str) -> Output {
    // keep /usr/bin and /bin so `sh` itself resolves; fakes shadow any
    // real tools because their directory comes first
    let path = format!("{}:/usr/bin:/bin", bin_dir.display());

    let mut child = Command::new(env!("CARGO_BIN_EXE_reconpipe"))
        .current_dir(workdir)
        .env("PATH", path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn reconpipe");

    // the child may exit before reading (precondition failures), so a
    // broken pipe here is fine
    let _ = child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin_data.as_bytes());
    child.wait_with_output().unwrap()
}

fn find_run_dir(workdir: &Path) -> Option<PathBuf> {
    fs::read_dir(workdir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.is_dir()
                && p.file_name()
                    .map(|n| n.to_string_lossy().starts_with("recon_example.com_"))
                    .unwrap_or(false)
        })
}

fn count_lines(path: &Path) -> usize {
    if !path.exists() {
        return 0;
    }
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .count()
}

#[test]
fn full_pipeline_merges_nine_unique_subdomains() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(
        bin_dir.path(),
        "https://a1.example.com [200] [Welcome] [nginx]\\nhttps://b1.example.com [301] [Moved] [Apache]\\n",
        "[cve-2021-0001] [http] [high] https://a1.example.com\\n",
    );

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "example.com\ny\n");
    assert!(output.status.success(), "pipeline exited non-zero");

    let run_dir = find_run_dir(workdir.path()).expect("run directory not created");
    assert_eq!(count_lines(&run_dir.join("example.com_subs_final.txt")), 9);
    assert_eq!(count_lines(&run_dir.join("example.com_httpx_live.txt")), 2);
    assert_eq!(count_lines(&run_dir.join("example.com_nuclei_targets.txt")), 2);
    assert_eq!(count_lines(&run_dir.join("example.com_nuclei_results.txt")), 1);

    // targets are the URL column only, annotations dropped
    let targets = fs::read_to_string(run_dir.join("example.com_nuclei_targets.txt")).unwrap();
    assert_eq!(targets, "https://a1.example.com\nhttps://b1.example.com\n");

    let report = fs::read_to_string(run_dir.join("example.com_report.txt")).unwrap();
    assert!(report.contains("BUG BOUNTY RECON REPORT - example.com"));
    assert!(report.contains("Subfinder Subdomains: 3"));
    assert!(report.contains("Assetfinder Subdomains: 3"));
    assert!(report.contains("Amass Subdomains: 3"));
    assert!(report.contains("Total Unique Subdomains: 9"));
    assert!(report.contains("Live Hosts: 2"));
    assert!(report.contains("Nuclei Targets: 2"));
    assert!(report.contains("Vulnerabilities Found: 1"));
}

#[test]
fn zero_live_hosts_does_not_fail_the_pipeline() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(bin_dir.path(), "", "");

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "example.com\ny\n");
    assert!(output.status.success());

    let run_dir = find_run_dir(workdir.path()).expect("run directory not created");
    let targets_file = run_dir.join("example.com_nuclei_targets.txt");
    assert!(targets_file.exists());
    assert_eq!(count_lines(&targets_file), 0);
    assert_eq!(count_lines(&run_dir.join("example.com_nuclei_results.txt")), 0);

    let report = fs::read_to_string(run_dir.join("example.com_report.txt")).unwrap();
    assert!(report.contains("Live Hosts: 0"));
    assert!(report.contains("Nuclei Targets: 0"));
    assert!(report.contains("Vulnerabilities Found: 0"));
}

#[test]
fn failing_tools_still_produce_a_report() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    // every tool exits non-zero without writing its output file
    for tool in ["subfinder", "assetfinder", "amass", "httpx", "nuclei"] {
        write_script(bin_dir.path(), tool, "echo 'tool blew up' >&2\nexit 2\n");
    }

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "example.com\ny\n");
    assert!(output.status.success(), "best-effort policy: run must complete");

    let run_dir = find_run_dir(workdir.path()).expect("run directory not created");
    let report = fs::read_to_string(run_dir.join("example.com_report.txt")).unwrap();
    assert!(report.contains("Total Unique Subdomains: 0"));
    assert!(report.contains("Vulnerabilities Found: 0"));
}

#[test]
fn scheme_prefix_is_stripped_from_domain_input() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(bin_dir.path(), "", "");

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "HTTPS://example.com/\ny\n");
    assert!(output.status.success());
    assert!(find_run_dir(workdir.path()).is_some());
}

#[test]
fn non_affirmative_confirmation_aborts_cleanly() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(bin_dir.path(), "", "");

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "example.com\nn\n");
    assert!(output.status.success(), "explicit abort exits zero");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Aborted"));
    assert!(find_run_dir(workdir.path()).is_none(), "abort must not write anything");
}

#[test]
fn empty_domain_is_a_fatal_precondition() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(bin_dir.path(), "", "");

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(find_run_dir(workdir.path()).is_none());
}

#[test]
fn missing_nuclei_aborts_before_any_stage() {
    let bin_dir = tempfile::tempdir().unwrap();
    let workdir = tempfile::tempdir().unwrap();
    install_fake_tools(bin_dir.path(), "", "");
    fs::remove_file(bin_dir.path().join("nuclei")).unwrap();

    let output = run_reconpipe(bin_dir.path(), workdir.path(), "example.com\ny\n");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Missing tools: nuclei"));
    assert!(find_run_dir(workdir.path()).is_none(), "no output directory on precondition failure");
}
