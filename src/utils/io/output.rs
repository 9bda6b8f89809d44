//! Results file writer
//!
//! Solutions are written as a pretty-printed JSON array of groups, each an
//! array of `{"Name": ..., "Traits": [...]}` members. The writer consumes
//! solutions one at a time, so a lazy search can be persisted without
//! materializing the full list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::algorithm::search::Solution;
use crate::error::util::ensure_directory;
use crate::error::{Result, SynergyError};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// File name used for the results of a given group size
#[must_use]
pub fn results_file_name(group_size: usize) -> String {
    format!("valid_groups_size_{group_size}.json")
}

/// Path of the results file inside `dir`
#[must_use]
pub fn results_path(dir: &Path, group_size: usize) -> PathBuf {
    dir.join(results_file_name(group_size))
}

/// Write solutions to `path`, returning how many were written
pub fn write_solutions<I>(path: &Path, solutions: I) -> Result<usize>
where
    I: IntoIterator<Item = Solution>,
{
    let start = Instant::now();
    log_operation_start("Writing results to", path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let file = File::create(path).map_err(|e| SynergyError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let written = write_solutions_to(&mut writer, solutions)?;
    writer.flush().map_err(|e| SynergyError::io(path, e))?;

    log_operation_complete("wrote", path, written, Some(start.elapsed()));
    Ok(written)
}

/// Write solutions as JSON to any writer
pub fn write_solutions_to<W, I>(writer: W, solutions: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Solution>,
{
    let mut written = 0usize;
    let members = solutions.into_iter().map(|solution| {
        written += 1;
        solution.members
    });

    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    serializer
        .collect_seq(members)
        .map_err(|e| SynergyError::Output(e.to_string()))?;
    Ok(written)
}
