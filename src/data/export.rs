use std::io::Write;
use std::path::Path;

use crate::data::grid::HeatGrid;

/// Header row written by [`write_points_csv`].
pub const CSV_HEADER: &str = "id,row_label,column_label,row,column,value,severity";

/// Quote a CSV field if it contains a delimiter, quote or line break.
pub fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Write every plot point of `grid`, in input order.
pub fn write_points_csv<W: Write>(mut w: W, grid: &HeatGrid) -> std::io::Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    for p in grid.points() {
        writeln!(
            w,
            "{},{},{},{},{},{},{}",
            p.id,
            csv_field(&p.row_label),
            csv_field(&p.column_label),
            p.row_position,
            p.column_position,
            p.value,
            p.severity().as_str()
        )?;
    }
    Ok(())
}

pub fn save_points_csv<P: AsRef<Path>>(path: P, grid: &HeatGrid) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = std::io::BufWriter::new(f);
    write_points_csv(&mut w, grid)?;
    w.flush()
}
