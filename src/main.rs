use std::path::PathBuf;

use anyhow::Context;
use hillmap::TerrainParameters;
use hillmap::export::{self, RawFormat};
use hillmap::render;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = TerrainParameters::default();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.seed);
    let size: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.size);
    let iterations: u32 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults.iterations);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let params = TerrainParameters {
        seed,
        size,
        iterations,
        ..defaults
    };

    let (grid, timings) = hillmap::generate_timed(&params)?;

    for t in &timings {
        tracing::info!("  {:12} {:8.1} ms", t.name, t.ms);
    }

    let n = grid.size() as u32;
    let save_rgba = |name: &str, rgba: &[u8]| -> anyhow::Result<()> {
        let path = out_dir.join(name);
        image::save_buffer(&path, rgba, n, n, image::ColorType::Rgba8)
            .with_context(|| format!("failed to save {}", path.display()))?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    };

    export::save_png(&grid, &out_dir.join("heightmap.png"))?;
    save_rgba("relief.png", &render::render_relief(&grid))?;
    export::save_raw(&grid, &out_dir.join("heightmap.raw"), RawFormat::Raw8)?;

    tracing::info!("Done.");
    Ok(())
}
