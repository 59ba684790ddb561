//! CSV export of body trails.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use orbyte_system::Simulation;

const HEADER: &str = "body,index,x_m,y_m,z_m";

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write every visible body's trail, oldest point first. Returns the number of rows.
pub fn write_trails(sim: &Simulation, writer: &mut dyn Write) -> io::Result<usize> {
    writeln!(writer, "{HEADER}")?;
    let mut rows = 0;
    for body in sim.visible_bodies() {
        let name = escape(body.name());
        for (index, point) in body.trail().points().enumerate() {
            writeln!(writer, "{},{},{},{},{}", name, index, point.x, point.y, point.z)?;
            rows += 1;
        }
    }
    writer.flush()?;
    log::debug!("wrote {rows} trail rows");
    Ok(rows)
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_awkward_names() {
        assert_eq!(escape("Earth"), "Earth");
        assert_eq!(escape("Alpha, Centauri"), "\"Alpha, Centauri\"");
        assert_eq!(escape("the \"Rock\""), "\"the \"\"Rock\"\"\"");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/trails.csv");
        let mut writer = writer_for_path(&path).unwrap();
        writeln!(writer, "x").unwrap();
        drop(writer);
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }
}
