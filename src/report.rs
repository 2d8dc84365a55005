use crate::CODE_COUNT;
use std::{
    fmt::Display,
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Tabulates a function over the full code domain into a two-column file.
///
/// Writes one line per code in `0..=4095`, the ASCII decimal code and the
/// function's value separated by a space, suitable for external plotting
/// tools. An existing file at `path` is removed first. Completion is
/// confirmed with a line naming the path; a failed write aborts this table
/// only.
pub fn write_table<F, V>(path: &Path, mut f: F) -> io::Result<()>
where
    F: FnMut(u16) -> V,
    V: Display,
{
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut out = BufWriter::new(fs::File::create(path)?);
    for code in 0..CODE_COUNT as u16 {
        writeln!(out, "{} {}", code, f(code))?;
    }
    out.flush()?;

    println!("output in {}", path.display());
    Ok(())
}
