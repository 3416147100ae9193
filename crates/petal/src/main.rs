use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod displacement;
mod layout;
mod preview;

#[derive(Parser)]
#[command(name = "petal")]
#[command(about = "Flower-mask layout and magnetometry tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the flower mask and write it as GDS
    #[command(alias = "l")]
    Layout(layout::LayoutArgs),

    /// Write an SVG quick-preview of the flower mask
    Preview(preview::PreviewArgs),

    /// Print vortex displacement slopes for a set of disk radii
    Displacement(displacement::DisplacementArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default log level depends on --debug; RUST_LOG overrides both.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Layout(args) => layout::execute(args),
        Commands::Preview(args) => preview::execute(args),
        Commands::Displacement(args) => displacement::execute(args),
    }
}
