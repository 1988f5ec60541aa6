use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use motif_engine_core::{AppConfig, DrawList, DrawStats, PixelPoint, SceneInstance, SceneKind};
use tracing_subscriber::EnvFilter;

fn main() -> motif_engine_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(sim) => run_frames(&sim),
        Commands::Dump { sim, output } => run_dump(&sim, output.as_deref()),
    }
}

fn run_frames(sim: &Simulation) -> motif_engine_core::Result<()> {
    let (scene, list) = simulate(sim)?;
    let stats = list.stats();
    tracing::info!(
        scene = %sim.scene,
        frames = scene.clock().frame,
        seconds = scene.clock().time_seconds,
        pixel_batches = stats.pixel_batches,
        pixels = stats.pixels,
        polygons = stats.polygons,
        arcs = stats.arcs,
        "finished run"
    );
    Ok(())
}

fn run_dump(sim: &Simulation, output: Option<&Path>) -> motif_engine_core::Result<()> {
    let (_, list) = simulate(sim)?;
    let json = serde_json::to_string_pretty(&list)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(?path, commands = list.len(), "wrote draw list");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Builds the scene, injects the requested input and runs the frame loop.
/// Returns the scene together with the draw list of the final frame.
fn simulate(sim: &Simulation) -> motif_engine_core::Result<(SceneInstance, DrawList)> {
    let config = match &sim.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let mut scene = SceneInstance::build(sim.scene, &config)?;
    tracing::info!(scene = %sim.scene, name = %scene.descriptor().name, "scene ready");

    for key in &sim.keys {
        if !scene.handle_key(*key) {
            tracing::warn!(%key, "no control bound to key");
        }
    }
    for click in &sim.clicks {
        let consumed = scene.handle_click(*click);
        tracing::info!(x = click.x, y = click.y, consumed, "click");
    }

    let mut list = DrawList::new();
    let mut totals = DrawStats::default();
    for _ in 0..sim.frames {
        list.clear();
        scene.frame(sim.delta, &mut list);
        let stats = list.stats();
        totals.pixel_batches += stats.pixel_batches;
        totals.pixels += stats.pixels;
        totals.polygons += stats.polygons;
        totals.arcs += stats.arcs;
    }
    tracing::debug!(?totals, "accumulated primitives");
    Ok((scene, list))
}

fn parse_point(raw: &str) -> Result<PixelPoint, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{raw}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid coordinate `{v}`: {err}"))
    };
    Ok(PixelPoint::new(coord(x)?, coord(y)?))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Procedural motif engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a scene headlessly and log what the last frame drew.
    Run(Simulation),
    /// Simulate a scene and write the last frame's draw list as JSON.
    Dump {
        #[command(flatten)]
        sim: Simulation,
        /// Output file; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct Simulation {
    /// Scene to build: outline, colored, kolintang or static.
    #[arg(short, long, default_value = "colored")]
    scene: SceneKind,
    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 120)]
    frames: u32,
    /// Fixed time step in seconds.
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    delta: f32,
    /// JSON configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Key presses applied before the first frame, e.g. `--key c --key a`.
    #[arg(short, long = "key")]
    keys: Vec<char>,
    /// Clicks at pixel `x,y` applied before the first frame.
    #[arg(long = "click", value_parser = parse_point)]
    clicks: Vec<PixelPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_click_points() {
        assert_eq!(parse_point("10, 20.5").unwrap(), PixelPoint::new(10.0, 20.5));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn dump_accepts_simulation_flags() {
        let cli = Cli::try_parse_from([
            "motif-engine-app",
            "dump",
            "--scene",
            "kolintang",
            "--frames",
            "3",
            "--key",
            "a",
            "--click",
            "988,540",
        ])
        .unwrap();
        match cli.command {
            Commands::Dump { sim, output } => {
                assert_eq!(sim.scene, SceneKind::Kolintang);
                assert_eq!(sim.frames, 3);
                assert_eq!(sim.keys, vec!['a']);
                assert_eq!(sim.clicks, vec![PixelPoint::new(988.0, 540.0)]);
                assert!(output.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn simulation_runs_every_frame() {
        let cli = Cli::try_parse_from(["motif-engine-app", "run", "-s", "outline", "-f", "5"]).unwrap();
        let Commands::Run(sim) = cli.command else {
            panic!("expected run");
        };
        let (scene, list) = simulate(&sim).unwrap();
        assert_eq!(scene.clock().frame, 5);
        assert!(!list.is_empty());
    }

    #[test]
    fn static_scene_is_selectable() {
        let cli = Cli::try_parse_from(["motif-engine-app", "run", "--scene", "static", "-f", "1"]).unwrap();
        let Commands::Run(sim) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(sim.scene, SceneKind::Static);
        let (_, list) = simulate(&sim).unwrap();
        assert_eq!(list.stats().polygons, 0);
        assert!(list.stats().pixel_batches > 1);
    }
}
