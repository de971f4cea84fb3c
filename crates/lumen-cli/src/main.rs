use clap::{Args, Parser, Subcommand};
use lumen_cli::OutputArgs;
use std::path::PathBuf;

mod commands;

use commands::{cmd_init, cmd_process, cmd_run};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(version, about = "Median and gamma enhancement for image folders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the configured sources, then enhance them once per parameter set
    Run(RunArgs),

    /// Enhance every image in a folder without the setup copy
    Process {
        /// Folder holding the images to enhance
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Folder receiving the enhanced images (created if missing)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Median window size (odd, >= 1)
        #[arg(short, long, value_name = "N", default_value = "3")]
        median: u32,

        /// Gamma exponent (> 0; < 1 brightens, > 1 darkens)
        #[arg(short, long, value_name = "G", default_value = "1.0")]
        gamma: f64,

        /// Parameter set N:G, may be repeated; overrides --median/--gamma
        #[arg(long, value_name = "N:G")]
        sweep: Vec<String>,

        /// Write a comparison contact sheet per image into DIR
        #[arg(long, value_name = "DIR")]
        contact_sheets: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the default run configuration as YAML
    Init {
        /// Destination file (default: ./lumen.yml)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Clone, Debug, Default)]
struct RunArgs {
    /// Run configuration file (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write comparison contact sheets regardless of the configured display
    #[arg(long)]
    contact_sheets: bool,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => cmd_run(args.config, args.contact_sheets, args.output),
        Commands::Process {
            input_dir,
            output_dir,
            median,
            gamma,
            sweep,
            contact_sheets,
            output,
        } => cmd_process(
            input_dir,
            output_dir,
            median,
            gamma,
            sweep,
            contact_sheets,
            output,
        ),
        Commands::Init { output, force } => cmd_init(output, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
