//! Non-interactive subcommands.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use xbtv_persistence::{FORMAT_VERSION, display_schedule, load_schedule};

/// Print the display rendering of a schedule file.
pub fn run_show(path: &Path, out: &mut impl Write) -> Result<()> {
    let schedule =
        load_schedule(path).with_context(|| format!("cannot show {}", path.display()))?;
    out.write_all(display_schedule(&schedule).as_bytes())?;
    Ok(())
}

/// Load a schedule file and report what it contains.
pub fn run_check(path: &Path, out: &mut impl Write) -> Result<()> {
    let schedule =
        load_schedule(path).with_context(|| format!("{} is not valid", path.display()))?;
    writeln!(
        out,
        "{}: ok, '{}' with {} program(s) (format version {})",
        path.display(),
        schedule.name(),
        schedule.len(),
        FORMAT_VERSION
    )?;
    Ok(())
}
