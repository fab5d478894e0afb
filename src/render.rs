use rayon::prelude::*;

use crate::grid::ElevationGrid;
use crate::synth::NORMALIZE_RANGE;

// Relief palette, keyed on the 0-255 elevation scale
const LOWLAND: [u8; 4] = [70, 130, 62, 255];
const MEADOW: [u8; 4] = [140, 180, 100, 255];
const HIGHLAND: [u8; 4] = [190, 170, 120, 255];
const MOUNTAIN_LOW: [u8; 4] = [140, 120, 100, 255];
const MOUNTAIN_HIGH: [u8; 4] = [220, 220, 215, 255];
const SNOW: [u8; 4] = [245, 248, 250, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

#[inline]
fn gray_level(v: f32) -> u8 {
    v.clamp(0.0, NORMALIZE_RANGE) as u8
}

/// Grayscale heightmap, one RGBA pixel per cell.
pub fn render_heightmap(grid: &ElevationGrid) -> Vec<u8> {
    let n = grid.size();
    let mut rgba = vec![0u8; n * n * 4];

    rgba.par_chunks_mut(n * 4).enumerate().for_each(|(y, row)| {
        for (x, &v) in grid.row(y).iter().enumerate() {
            let g = gray_level(v);
            row[x * 4..x * 4 + 4].copy_from_slice(&[g, g, g, 255]);
        }
    });

    rgba
}

/// Colored relief map.
pub fn render_relief(grid: &ElevationGrid) -> Vec<u8> {
    let n = grid.size();
    let mut rgba = vec![0u8; n * n * 4];

    rgba.par_chunks_mut(n * 4).enumerate().for_each(|(y, row)| {
        for (x, &v) in grid.row(y).iter().enumerate() {
            let h = v.clamp(0.0, NORMALIZE_RANGE);
            let color = if h < 64.0 {
                lerp_color(LOWLAND, MEADOW, h / 64.0)
            } else if h < 128.0 {
                lerp_color(MEADOW, HIGHLAND, (h - 64.0) / 64.0)
            } else if h < 192.0 {
                lerp_color(MOUNTAIN_LOW, MOUNTAIN_HIGH, (h - 128.0) / 64.0)
            } else {
                lerp_color(MOUNTAIN_HIGH, SNOW, (h - 192.0) / 63.0)
            };
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

/// One byte per cell, row-major. Used for PNG and raw 8-bit output.
pub fn to_luma8(grid: &ElevationGrid) -> Vec<u8> {
    grid.as_slice().par_iter().map(|&v| gray_level(v)).collect()
}
