//! retro-probe CLI
//!
//! Command-line interface for identifying console cartridge dumps and disc
//! images.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use retro_probe_lib::{Platform, ProbeContext, ProbeOptions};

use crate::commands::info::{InfoFormat, run_info};
use crate::commands::list::run_list;
pub(crate) use crate::error::CliError;

#[derive(Parser)]
#[command(name = "retro-probe")]
#[command(about = "Identify console ROM dumps and disc images", long_about = None)]
struct Cli {
    /// Show debug output (layout resolution, rejected decoders)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the header of one or more images
    Info {
        /// Print the fields as JSON, one object per line
        #[arg(long)]
        json: bool,

        /// Sectors to read from the data track of a disc image
        #[arg(long, value_name = "N")]
        sectors: Option<u64>,

        /// Maximum bytes to read from a cartridge file
        #[arg(long, value_name = "BYTES")]
        max_size: Option<u64>,

        /// Only try these platforms (e.g., dc,saturn,genesis)
        #[arg(short, long, value_delimiter = ',')]
        platform: Option<Vec<Platform>>,

        /// Image files (.cue, .gdi, .cdi, .iso, .bin, .md, ...)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List all supported platforms
    List,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Info {
            json,
            sectors,
            max_size,
            platform,
            paths,
        } => {
            let mut options = ProbeOptions::new();
            if let Some(n) = sectors {
                options = options.sector_read_count(n);
            }
            if let Some(bytes) = max_size {
                options = options.max_cartridge_bytes(bytes);
            }
            let mut ctx = create_context(options);
            if let Some(platforms) = platform {
                ctx.retain_platforms(&platforms);
            }
            let format = if json {
                InfoFormat::Json
            } else {
                InfoFormat::Text
            };
            run_info(&ctx, &paths, format)
        }
        Commands::List => {
            run_list(&create_context(ProbeOptions::default()));
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .init();
}

/// Create the probe context with all registered decoders.
fn create_context(options: ProbeOptions) -> ProbeContext {
    retro_probe_lib::create_context_with_options(options)
}
