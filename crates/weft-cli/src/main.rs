//! weft CLI: run scenes, benchmark them, check configs, inspect snapshots.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about = "weft: mass-spring cloth simulator")]
struct Cli {
    /// Log more (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one scene.
    Run {
        /// Built-in scene (pinned2, pinned4, sphere, plane, self_collision).
        #[arg(short, long, default_value = "pinned2", conflicts_with = "scene")]
        scenario: String,

        /// Scene file (TOML) to run instead of a built-in one.
        #[arg(long)]
        scene: Option<String>,

        /// Override the number of frames.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Cloth parameters (TOML) replacing the scene's own.
        #[arg(short, long)]
        params: Option<String>,

        /// Write the final state here.
        #[arg(long)]
        snapshot: Option<String>,
    },

    /// Run built-in scenes and report timings.
    Benchmark {
        /// Which scene to run, or `all`.
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override the number of frames.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        path: String,
    },

    /// Validate a scene or cloth-parameter file (TOML).
    Validate {
        path: String,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            scenario,
            scene,
            frames,
            params,
            snapshot,
        } => commands::run(commands::RunArgs {
            scenario: &scenario,
            scene: scene.as_deref(),
            frames,
            params: params.as_deref(),
            snapshot: snapshot.as_deref(),
        }),
        Commands::Benchmark {
            scenario,
            frames,
            output,
        } => commands::benchmark(&scenario, frames, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
