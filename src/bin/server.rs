use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hillmap::render;
use hillmap::{ElevationGrid, TerrainParameters};

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(flatten)]
    params: TerrainParameters,
    #[serde(default)]
    random_seed: bool,
}

#[derive(Serialize)]
struct GenerateResponse {
    seed: u64,
    size: usize,
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

type ApiError = (StatusCode, String);

/// Largest grid side served over HTTP.
const MAX_SIZE: usize = 4096;

fn check_request(params: &TerrainParameters) -> Result<(), ApiError> {
    params
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    if params.size > MAX_SIZE {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("grid size {} exceeds the limit of {MAX_SIZE}", params.size),
        ));
    }
    Ok(())
}

fn encode_png(
    pixels: &[u8],
    size: usize,
    color: image::ExtendedColorType,
) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(pixels, size as u32, size as u32, color)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn layers(grid: &ElevationGrid) -> Result<Vec<Layer>, ApiError> {
    let n = grid.size();
    Ok(vec![
        Layer {
            name: "heightmap".into(),
            data_url: encode_png(&render::to_luma8(grid), n, image::ExtendedColorType::L8)?,
        },
        Layer {
            name: "relief".into(),
            data_url: encode_png(&render::render_relief(grid), n, image::ExtendedColorType::Rgba8)?,
        },
    ])
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let params = if req.random_seed {
        req.params.with_random_seed()
    } else {
        req.params
    };
    check_request(&params)?;

    let response = tokio::task::spawn_blocking(move || {
        let (grid, timings) =
            hillmap::generate_timed(&params).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok::<_, ApiError>(GenerateResponse {
            seed: params.seed,
            size: grid.size(),
            layers: layers(&grid)?,
            timings: timing_entries,
        })
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("generation task failed: {e}")))??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("hillmap server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
