use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use clap::Parser;
use formats::{CountryCollection, CountryData, COUNTRY_DATA_PATH, GEOGRAPHY_PATH};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Static file server for the score globe")]
struct Args {
    /// Directory holding index.html, the wasm bundle and assets/
    #[arg(long, env = "GLOBE_ASSETS_DIR", default_value = "dist")]
    dir: PathBuf,

    /// Listen address
    #[arg(long, env = "GLOBE_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !args.dir.is_dir() {
        return Err(format!("asset directory not found: {}", args.dir.display()).into());
    }
    check_assets(&args.dir).await;

    let app = router(&args.dir);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("serving {} on http://{}", args.dir.display(), args.addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("ctrl-c handler failed: {err}");
    }
    info!("shutting down");
}

/// On-disk location of a relative asset URL.
fn asset_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(url.trim_start_matches("./"))
}

#[derive(Debug, Default, PartialEq)]
struct AssetReport {
    countries_scored: Option<usize>,
    country_outlines: Option<usize>,
    problems: Vec<String>,
}

/// Parse both data files so broken assets show up in the log at startup
/// rather than as a grey globe in the browser.
async fn check_assets(dir: &Path) -> AssetReport {
    let mut report = AssetReport::default();

    let data_path = asset_path(dir, COUNTRY_DATA_PATH);
    match tokio::fs::read_to_string(&data_path).await {
        Ok(text) => match CountryData::from_json_str(&text) {
            Ok(data) => {
                info!("{}: {} country records", data_path.display(), data.len());
                report.countries_scored = Some(data.len());
            }
            Err(err) => report.problems.push(format!("{}: {err}", data_path.display())),
        },
        Err(err) => report.problems.push(format!("{}: {err}", data_path.display())),
    }

    let geo_path = asset_path(dir, GEOGRAPHY_PATH);
    match tokio::fs::read_to_string(&geo_path).await {
        Ok(text) => match CountryCollection::from_geojson_str(&text) {
            Ok(collection) => {
                info!(
                    "{}: {} country outlines",
                    geo_path.display(),
                    collection.len()
                );
                report.country_outlines = Some(collection.len());
            }
            Err(err) => report.problems.push(format!("{}: {err}", geo_path.display())),
        },
        Err(err) => report.problems.push(format!("{}: {err}", geo_path.display())),
    }

    for problem in &report.problems {
        warn!("asset check: {problem}");
    }
    report
}
