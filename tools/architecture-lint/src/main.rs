//! Runs the architecture lint over `taskboard/src` from the workspace root.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(crate_dir) = taskboard_dir() else {
        report(&"unable to locate the taskboard crate from the workspace root");
        return ExitCode::FAILURE;
    };
    match architecture_lint::lint_crate_sources(&crate_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &dyn fmt::Display) {
    if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
        drop(write_err);
    }
}

/// `CARGO_WORKSPACE_DIR` when set, else two levels above this tool's manifest.
fn taskboard_dir() -> Option<PathBuf> {
    let root = std::env::var_os("CARGO_WORKSPACE_DIR")
        .map(PathBuf::from)
        .or_else(|| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .ancestors()
                .nth(2)
                .map(Path::to_path_buf)
        })?;
    let dir = root.join("taskboard");
    dir.join("src").is_dir().then_some(dir)
}
