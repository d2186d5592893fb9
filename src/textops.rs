// textops.rs - Line-oriented text file transforms
// Every artifact the pipeline produces is a newline-delimited text file;
// these helpers count, merge, and project those files in-process instead
// of shelling out to cat/sort/cut.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Count lines in a file. A missing file is the expected state for a stage
/// that failed or produced nothing, so it counts as zero rather than an
/// error. An unterminated final line still counts once.
pub fn count_lines(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let file = File::open(path).context(format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    Ok(reader.lines().count())
}

/// Merge any number of line files into their deduplicated union, written
/// sorted to `output`. Equivalent to `cat a b | sort -u > out` but without
/// depending on the system sort utility. Missing inputs are skipped.
/// Returns the number of unique lines written.
pub fn merge_unique(inputs: &[&Path], output: &Path) -> Result<usize> {
    let mut lines: BTreeSet<String> = BTreeSet::new();

    for input in inputs {
        if !input.exists() {
            continue;
        }
        let file = File::open(input).context(format!("Failed to open {}", input.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.context(format!("Failed to read {}", input.display()))?;
            if !line.trim().is_empty() {
                lines.insert(line);
            }
        }
    }

    let out = File::create(output).context(format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(out);
    for line in &lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    Ok(lines.len())
}

/// Write the first whitespace-delimited field of each non-empty line of
/// `input` to `output`, dropping annotation columns. A missing input yields
/// an empty output file. Returns the number of lines written.
pub fn extract_first_field(input: &Path, output: &Path) -> Result<usize> {
    let out = File::create(output).context(format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(out);
    let mut written = 0;

    if input.exists() {
        let file = File::open(input).context(format!("Failed to open {}", input.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.context(format!("Failed to read {}", input.display()))?;
            if let Some(field) = line.split_whitespace().next() {
                writeln!(writer, "{}", field)?;
                written += 1;
            }
        }
    }

    writer.flush()?;
    Ok(written)
}
