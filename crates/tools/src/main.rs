use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use engine::{Container, MapCallbacks, MapOptions, Point, initialize};
use formats::{Topology, decode_border_mesh, decode_object, features_to_geojson};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inspect TopoJSON datasets and render them as choropleth SVG snapshots.
#[derive(Parser, Debug)]
#[command(name = "atlas", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List objects, region names and geometry counts.
    Inspect {
        topology: PathBuf,
        /// Only this object (default: every object).
        #[arg(long)]
        object: Option<String>,
        #[arg(long, default_value = "name")]
        name_property: String,
    },
    /// Load a topology into a map and write the resulting SVG.
    Render {
        topology: PathBuf,
        /// Object to draw (default: first object in the file).
        #[arg(long)]
        object: Option<String>,
        /// Map options JSON (same keys as the host configuration).
        #[arg(long)]
        options: Option<PathBuf>,
        /// Points JSON array, replacing any points from the options file.
        #[arg(long)]
        points: Option<PathBuf>,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Select (and zoom to) the region with this name.
        #[arg(long)]
        select: Option<String>,
        /// Output path; stdout when absent.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode an object to a GeoJSON FeatureCollection.
    Geojson {
        topology: PathBuf,
        #[arg(long)]
        object: Option<String>,
        #[arg(long, default_value = "name")]
        name_property: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Inspect {
            topology,
            object,
            name_property,
        } => cmd_inspect(&topology, object.as_deref(), &name_property),
        Command::Render {
            topology,
            object,
            options,
            points,
            width,
            height,
            select,
            out,
        } => cmd_render(RenderArgs {
            topology,
            object,
            options,
            points,
            width,
            height,
            select,
            out,
        }),
        Command::Geojson {
            topology,
            object,
            name_property,
            out,
        } => cmd_geojson(&topology, object.as_deref(), &name_property, out.as_deref()),
    }
}

#[derive(Debug, Serialize)]
struct ObjectSummary {
    name: String,
    regions: Vec<String>,
    skipped: usize,
    border_lines: usize,
}

fn cmd_inspect(path: &Path, object: Option<&str>, name_property: &str) -> Result<(), String> {
    let topology = Topology::load(path).map_err(|e| e.to_string())?;
    topology.validate().map_err(|e| e.to_string())?;

    let names: Vec<&str> = match object {
        Some(name) => vec![name],
        None => topology.object_names().collect(),
    };
    let summaries: Vec<ObjectSummary> = names
        .into_iter()
        .map(|name| {
            let decoded = decode_object(&topology, name, name_property);
            ObjectSummary {
                name: name.to_string(),
                regions: decoded.features.into_iter().map(|f| f.name).collect(),
                skipped: decoded.skipped,
                border_lines: decode_border_mesh(&topology, name).lines.len(),
            }
        })
        .collect();

    let payload = serde_json::to_string_pretty(&summaries).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

struct RenderArgs {
    topology: PathBuf,
    object: Option<String>,
    options: Option<PathBuf>,
    points: Option<PathBuf>,
    width: f64,
    height: f64,
    select: Option<String>,
    out: Option<PathBuf>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_str(&payload).map_err(|e| format!("parse {path:?}: {e}"))
}

fn cmd_render(args: RenderArgs) -> Result<(), String> {
    let topology = Topology::load(&args.topology).map_err(|e| e.to_string())?;

    let mut options: MapOptions = match &args.options {
        Some(path) => read_json(path)?,
        None => MapOptions::default(),
    };
    if let Some(path) = &args.points {
        options.points = read_json::<Vec<Point>>(path)?;
    }
    let container = Container::new("atlas", args.width, args.height);

    let mut map = initialize(
        &container,
        options,
        MapCallbacks::new(),
        &topology,
        args.object.as_deref(),
    )
    .map_err(|e| e.to_string())?;

    if let Some(name) = &args.select {
        let index = map
            .region_index(name)
            .ok_or_else(|| format!("no region named {name:?}"))?;
        map.select_region(index);
        map.settle();
    }

    let svg = map.to_svg();
    info!(
        regions = map.features().len(),
        points = map.points().len(),
        selected = map.selected_region().unwrap_or(""),
        "rendered map"
    );
    write_output(args.out.as_deref(), &svg)
}

fn cmd_geojson(
    path: &Path,
    object: Option<&str>,
    name_property: &str,
    out: Option<&Path>,
) -> Result<(), String> {
    let topology = Topology::load(path).map_err(|e| e.to_string())?;
    let name = match object {
        Some(name) => name,
        None => topology.first_object_name().map_err(|e| e.to_string())?,
    };
    let decoded = decode_object(&topology, name, name_property);
    let value = features_to_geojson(&decoded.features, name_property);
    let payload = serde_json::to_string_pretty(&value).map_err(|e| format!("json: {e}"))?;
    write_output(out, &payload)
}

fn write_output(out: Option<&Path>, payload: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| format!("create {parent:?}: {e}"))?;
            }
            fs::write(path, payload).map_err(|e| format!("write {path:?}: {e}"))?;
            info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}
