//! Writers for finished height fields: 8-bit grayscale PNG and headerless
//! raw heightmaps (row-major, one sample per cell).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::grid::ElevationGrid;
use crate::render::to_luma8;
use crate::synth::NORMALIZE_RANGE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawFormat {
    /// One byte per cell.
    Raw8,
    /// One little-endian u16 per cell, scaled to the full 0-65535 range.
    Raw16,
}

pub fn save_png(grid: &ElevationGrid, path: &Path) -> Result<(), ExportError> {
    let n = grid.size() as u32;
    image::save_buffer(path, &to_luma8(grid), n, n, image::ColorType::L8)?;
    tracing::info!(path = %path.display(), "saved heightmap image");
    Ok(())
}

pub fn write_raw8<W: Write>(grid: &ElevationGrid, mut out: W) -> Result<(), ExportError> {
    out.write_all(&to_luma8(grid))?;
    Ok(())
}

pub fn write_raw16<W: Write>(grid: &ElevationGrid, mut out: W) -> Result<(), ExportError> {
    let scale = u16::MAX as f32 / NORMALIZE_RANGE;
    for &v in grid.as_slice() {
        let sample = (v.clamp(0.0, NORMALIZE_RANGE) * scale).round() as u16;
        out.write_all(&sample.to_le_bytes())?;
    }
    Ok(())
}

pub fn save_raw(grid: &ElevationGrid, path: &Path, format: RawFormat) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        RawFormat::Raw8 => write_raw8(grid, &mut out)?,
        RawFormat::Raw16 => write_raw16(grid, &mut out)?,
    }
    out.flush()?;
    tracing::info!(path = %path.display(), ?format, "saved raw heightmap");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn sample() -> ElevationGrid {
        let mut g = Grid::<f32>::new(2, 2);
        g.data.copy_from_slice(&[0.0, 51.0, 127.5, 255.0]);
        ElevationGrid::from_grid(g)
    }

    #[test]
    fn raw8_is_one_byte_per_cell() {
        let mut buf = Vec::new();
        write_raw8(&sample(), &mut buf).unwrap();
        assert_eq!(buf, vec![0, 51, 127, 255]);
    }

    #[test]
    fn raw16_is_little_endian_full_range() {
        let mut buf = Vec::new();
        write_raw16(&sample(), &mut buf).unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(u16::from_le_bytes([buf[0], buf[1]]), 0);
        assert_eq!(u16::from_le_bytes([buf[2], buf[3]]), 13107);
        assert_eq!(u16::from_le_bytes([buf[6], buf[7]]), u16::MAX);
    }

    #[test]
    fn files_land_on_disk() {
        let dir = std::env::temp_dir().join(format!("hillmap-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let raw = dir.join("h.raw");
        save_raw(&sample(), &raw, RawFormat::Raw16).unwrap();
        assert_eq!(std::fs::metadata(&raw).unwrap().len(), 8);

        let png = dir.join("h.png");
        save_png(&sample(), &png).unwrap();
        let img = image::open(&png).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, [51]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = Path::new("/nonexistent-hillmap-dir/h.raw");
        assert!(matches!(
            save_raw(&sample(), path, RawFormat::Raw8),
            Err(ExportError::Io(_))
        ));
    }
}
