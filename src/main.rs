use anyhow::{Context, Result};
use clap::Parser;
use deepcow_core::{init_logging, Environment, Renderer};
use deepcow_lib::app::{self, EpisodeRunner};
use deepcow_lib::policy::PolicyKind;
use deepcow_lib::ui::{JsonlRenderer, TraceRenderer};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of episodes to run
    #[arg(short, long, default_value_t = 1)]
    episodes: usize,

    /// Overrides the config seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log a summary of every rendered frame
    #[arg(long)]
    draw: bool,

    /// Write every frame as JSON lines to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Action source for all agents
    #[arg(short, long, value_enum, default_value = "random")]
    policy: PolicyKind,

    /// Per-episode tick limit, overriding the config
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = app::load_config(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.max_ticks.is_some() {
        config.episode.max_ticks = args.max_ticks;
    }
    config.draw |= args.draw;

    if args.dump_config {
        print!("{}", app::to_toml(&config)?);
        return Ok(());
    }

    let policy = args.policy.build(config.seed);
    let draw = config.draw;
    let env = Environment::new(config)?;
    let mut runner = EpisodeRunner::new(env, policy);

    let renderer: Option<Box<dyn Renderer>> = match (&args.trace, draw) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create trace file {}", path.display()))?;
            Some(Box::new(JsonlRenderer::new(BufWriter::new(file))))
        }
        (None, true) => Some(Box::new(TraceRenderer::default())),
        (None, false) => None,
    };
    if let Some(renderer) = renderer {
        runner = runner.with_renderer(renderer);
    }

    let reports = runner.run(args.episodes)?;
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }

    let metrics = runner.env().metrics();
    tracing::info!(
        episodes = metrics.episode_count(),
        ticks = metrics.tick_count(),
        eaten = metrics.eat_count(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Run finished"
    );
    Ok(())
}
