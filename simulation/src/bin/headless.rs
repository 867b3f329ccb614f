use simulation::{
    Clock, Drawable, ManualClock, RenderKind, Renderer, RendererRegistry, Simulation,
    SimulationConfig,
};

use anyhow::{Context, Result};
use clap::Parser;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the ball simulation without a window on a virtual clock.
#[derive(Parser, Debug)]
struct Args {
    /// YAML file with simulation settings.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides `initial_bodies`.
    #[arg(short, long)]
    bodies: Option<usize>,
    #[arg(short, long, default_value_t = 600)]
    frames: u64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    restitution: Option<f32>,
    /// Log statistics every N frames. 0 disables them.
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

// What a frame would have put on screen.
#[derive(Debug, Default)]
struct FrameSummary {
    balls: usize,
    nodes: usize,
    deepest: usize,
}

struct BallCounter;

impl Renderer<FrameSummary> for BallCounter {
    fn draw(&mut self, surface: &mut FrameSummary, _drawable: &Drawable<'_>) {
        surface.balls += 1;
    }
}

struct NodeCounter;

impl Renderer<FrameSummary> for NodeCounter {
    fn draw(&mut self, surface: &mut FrameSummary, drawable: &Drawable<'_>) {
        if let Drawable::QuadTree(tree) = drawable {
            for node in tree.nodes() {
                surface.nodes += 1;
                surface.deepest = surface.deepest.max(node.depth());
            }
        }
    }
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(bodies) = args.bodies {
        config.initial_bodies = bodies;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(restitution) = args.restitution {
        config.restitution = restitution;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(?config, "configuration loaded");

    // One virtual frame per frame-limiter slot.
    let frame_time = match config.max_fps {
        0 => config.fixed_dt,
        fps => 1.0 / f64::from(fps),
    };
    let mut clock = ManualClock::new(frame_time);

    let mut simulation = Simulation::new(config).context("failed to create simulation")?;
    simulation.populate()?;
    let energy_before = simulation.kinetic_energy();

    let mut registry: RendererRegistry<FrameSummary> = RendererRegistry::new();
    registry.register(RenderKind::Ball, BallCounter);
    registry.register(RenderKind::QuadTree, NodeCounter);

    let mut frame = 0;
    simulation.run(&mut clock, |simulation, report| {
        frame += 1;
        if args.log_every > 0 && frame % args.log_every == 0 {
            let mut summary = FrameSummary::default();
            registry.render(&mut summary, simulation.drawables());
            let stats = simulation.last_stats();
            info!(
                frame,
                ticks = report.ticks,
                alpha = report.alpha,
                balls = summary.balls,
                nodes = summary.nodes,
                depth = summary.deepest,
                candidate_pairs = stats.candidate_pairs,
                redundant_pairs = stats.redundant_pairs(),
                "frame"
            );
        }
        if frame >= args.frames {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    info!(
        frames = frame,
        ticks = simulation.ticks(),
        virtual_seconds = clock.now(),
        energy_before,
        energy_after = simulation.kinetic_energy(),
        "done"
    );
    Ok(())
}
