//! hexspacer - cut paths for hexagonal battery-pack plates.
//!
//! ```text
//! hexspacer render demos/test_14s1p.yaml -o test_14s1p.dxf
//! hexspacer preview demos/reention_56_14s.yaml -o preview.png
//! hexspacer check demos/reention_70_14s.yaml
//! ```

mod cli;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexspacer")]
#[command(about = "Generate spacer and nickel strip cut paths for hexagonal cell packs")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a layout to DXF, SVG or JSON
    Render {
        /// Layout file (YAML)
        layout: PathBuf,

        /// Output file; the format follows the extension [default: <name>.dxf]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rasterize a layout to PNG
    Preview {
        /// Layout file (YAML)
        layout: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Pixels per SVG pixel
        #[arg(short, long, default_value = "2.0")]
        scale: f32,
    },

    /// Validate a layout and print per-layer statistics
    Check {
        /// Layout file (YAML)
        layout: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Render { layout, output } => cli::cmd_render(&layout, output),
        Commands::Preview { layout, output, scale } => cli::cmd_preview(&layout, &output, scale),
        Commands::Check { layout } => cli::cmd_check(&layout),
    }
}
