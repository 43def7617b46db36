use anyhow::{bail, Context};
use methane_map::prelude::*;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Headless permit map viewer.
///
/// Prints the permit layer definition as JSON, then reads extents from stdin
/// (`xmin ymin xmax ymax` per line) and prints every recenter the viewport
/// clamp asks for.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    methane_map::init_logging();

    let args = Args::parse(std::env::args().skip(1))?;
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(source) = args.source {
        config.source = source;
    }

    let mut viewer = MapViewer::new(config, ConsoleEngine::default())?;
    let count = viewer
        .load_permit_layer()
        .await
        .with_context(|| format!("loading permits from {}", viewer.config().source))?;
    log::info!("{} permits on the map", count);

    // Nothing to wait for without a real view
    viewer.on_view_ready(Ok(()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_extent(line) {
            Ok(extent) => {
                viewer.on_extent_changed(&extent);
            }
            Err(e) => log::warn!("skipping extent {:?}: {}", line, e),
        }
    }

    log::debug!(
        "{} recenter requests issued",
        viewer.engine().recenters
    );
    Ok(())
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    source: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("--config needs a file")?;
                    parsed.config = Some(PathBuf::from(path));
                    continue;
                }
                "--help" | "-h" => {
                    println!("usage: methane-map-app [--config <file>] [source]");
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => bail!("unknown flag {}", flag),
                _ => {}
            }

            if parsed.source.is_some() {
                bail!("unexpected argument {}", arg);
            }
            parsed.source = Some(arg);
        }

        Ok(parsed)
    }
}

fn parse_extent(line: &str) -> anyhow::Result<Extent> {
    let values = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().with_context(|| format!("bad number {:?}", part)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match values.as_slice() {
        [xmin, ymin, xmax, ymax] => Ok(Extent::from_coords(*xmin, *ymin, *xmax, *ymax)),
        _ => bail!("expected 4 values, got {}", values.len()),
    }
}

/// Stands in for a drawing engine: definitions go to stdout, the rest to the log
#[derive(Debug, Default)]
struct ConsoleEngine {
    recenters: usize,
}

impl MapEngine for ConsoleEngine {
    fn configure(&mut self, setup: &EngineSetup) -> Result<()> {
        log::info!(
            "engine setup: basemap {}, assets at {}",
            setup.basemap,
            setup.assets_path
        );
        Ok(())
    }

    fn add_layer(&mut self, layer: FeatureLayerDefinition) -> Result<()> {
        println!("{}", layer.to_json()?);
        Ok(())
    }

    fn add_legend(&mut self, legend: &Legend, sections: &[LegendSection]) -> Result<()> {
        log::info!(
            "legend at {:?}: {}",
            legend.position,
            serde_json::to_string(sections)?
        );
        Ok(())
    }

    fn go_to(&mut self, target: LatLng, options: GoToOptions) -> Result<()> {
        self.recenters += 1;
        println!(
            "recenter {:.6} {:.6} ({} ms)",
            target.lat,
            target.lng,
            options.duration.as_millis()
        );
        Ok(())
    }
}
