use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use layers::Details;
use tools::{
    RenderOptions, format_summary, load_country_data, load_geography, lookup, render_svg,
    summarize,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score globe utilities")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the globe to a standalone SVG file
    Render {
        /// Country score file (data.json)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Natural Earth countries GeoJSON
        #[arg(long)]
        geography: PathBuf,

        /// Output SVG path
        #[arg(long, default_value = "globe.svg")]
        out: PathBuf,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 720.0)]
        height: f64,

        /// Zoom factor; the globe radius is 400 px times this, floored at 0.3
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Rotation about the polar axis, degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotate_lon: f64,

        /// Tilt towards the viewer, degrees
        #[arg(long, default_value_t = -30.0, allow_hyphen_values = true)]
        rotate_lat: f64,
    },

    /// Show score, fill and hover text for one country
    Lookup {
        /// ISO 3166-1 alpha-2 code
        code: String,

        #[arg(long)]
        data: PathBuf,

        /// Display name; defaults to the NAME from --geography, then the code
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        geography: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Count countries per colour bucket
    Summary {
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    match Args::parse().command {
        Command::Render {
            data,
            geography,
            out,
            width,
            height,
            zoom,
            rotate_lon,
            rotate_lat,
        } => {
            let data = data.as_deref().map(load_country_data).transpose()?;
            if data.is_none() {
                warn!("no --data given; every country gets the neutral fill");
            }
            let geography = load_geography(&geography)?;
            let svg = render_svg(
                data.as_ref(),
                &geography,
                RenderOptions {
                    width,
                    height,
                    zoom,
                    rotate: [rotate_lon, rotate_lat],
                },
            );
            fs::write(&out, svg).map_err(|e| format!("write {out:?}: {e}"))?;
            info!("wrote {} countries to {out:?}", geography.len());
            Ok(())
        }
        Command::Lookup {
            code,
            data,
            name,
            geography,
            json,
        } => {
            let data = load_country_data(&data)?;
            let name = match (name, geography) {
                (Some(n), _) => n,
                (None, Some(path)) => load_geography(&path)?
                    .find(&code)
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| code.clone()),
                (None, None) => code.clone(),
            };
            let report = lookup(&data, &code, &name);
            if json {
                let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
                println!("{text}");
            } else {
                let score = report
                    .score
                    .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
                let details = match &report.details {
                    Details::Text(text) => text.clone(),
                    Details::Withheld => "(withheld)".to_string(),
                    Details::Cleared => "(cleared)".to_string(),
                };
                println!("{} {}", report.code, report.name);
                println!("  score:   {score}");
                println!("  fill:    {}", report.fill);
                println!("  details: {details}");
            }
            Ok(())
        }
        Command::Summary { data, json } => {
            let summary = summarize(&load_country_data(&data)?);
            if json {
                let text = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
                println!("{text}");
            } else {
                print!("{}", format_summary(&summary));
            }
            Ok(())
        }
    }
}
