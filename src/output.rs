//! Report files on disk.
//!
//! A report never replaces an earlier file unless asked to: when the target
//! name is taken, the new file gets a local timestamp suffix
//! (`extract_tags_20240131_142501.txt`), and a counter if that is taken too.

use crate::error::ExportError;
use crate::render::Report;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Write `report` into `dir`, returning the path actually written.
pub fn write_report(dir: &Path, report: &Report, overwrite: bool) -> Result<PathBuf, ExportError> {
    let target = dir.join(report.section.file_name());
    let write_error = |path: &Path, source: io::Error| ExportError::Write {
        section: report.section.title(),
        path: path.to_path_buf(),
        source,
    };

    let (path, mut file) = if overwrite {
        let file = File::create(&target).map_err(|e| write_error(&target, e))?;
        (target, file)
    } else {
        create_unique(&target).map_err(|e| write_error(&target, e))?
    };

    report
        .write_to(&mut file)
        .map_err(|e| write_error(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote report");
    Ok(path)
}

/// Create `target` exclusively, falling back to timestamped siblings.
fn create_unique(target: &Path) -> io::Result<(PathBuf, File)> {
    match create_new(target) {
        Ok(file) => return Ok((target.to_path_buf(), file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(e),
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut counter = 0u32;
    loop {
        let candidate = timestamped_name(target, &stamp, counter);
        match create_new(&candidate) {
            Ok(file) => {
                tracing::info!(
                    existing = %target.display(),
                    written = %candidate.display(),
                    "report exists, writing timestamped copy"
                );
                return Ok((candidate, file));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(e) => return Err(e),
        }
    }
}

fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// `<stem>_<stamp><ext>`, or `<stem>_<stamp>_<n><ext>` when `counter > 0`.
fn timestamped_name(target: &Path, stamp: &str, counter: u32) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = target
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let name = if counter == 0 {
        format!("{stem}_{stamp}{ext}")
    } else {
        format!("{stem}_{stamp}_{counter}{ext}")
    };
    target.with_file_name(name)
}

/// Create the output directory and every missing parent.
pub fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
