//! SpritePack CLI - Command-line interface for building animation resource stores
//!
//! This binary imports spritesheet pictures, builds animation records and tag
//! indexes from YAML descriptors, and inspects the resulting store.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use spritepack_cli::{commands, error_kind, logging};
use spritepack_pipeline::config::{
    DEFAULT_ANIMATIONS_META, DEFAULT_DESCRIPTOR_SUFFIX, DEFAULT_OUT, DEFAULT_SPRITESHEETS_DIR,
    DEFAULT_SPRITESHEETS_META,
};
use spritepack_store::{Bucket, StoreOptions};

/// SpritePack - Spritesheet Animation Packer
#[derive(Parser)]
#[command(name = "spritepack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Maximum resource store size in MiB (default: 1024)
    #[arg(long, global = true, value_name = "MB", value_parser = parse_map_size_mb)]
    map_size_mb: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import spritesheet images and build animations (embedded layout)
    Pack {
        /// Directory of spritesheet images, one spritesheet per file
        #[arg(long, default_value = DEFAULT_SPRITESHEETS_DIR)]
        spritesheets: PathBuf,

        /// Animation descriptor file
        #[arg(long, default_value = DEFAULT_ANIMATIONS_META)]
        animations_meta: PathBuf,

        /// Spritesheet cell-size metadata file
        #[arg(long, default_value = DEFAULT_SPRITESHEETS_META)]
        spritesheets_meta: PathBuf,

        /// Resource store to write
        #[arg(short, long, default_value = DEFAULT_OUT)]
        out: PathBuf,

        /// Reuse the pictures already in the store instead of importing
        #[arg(long)]
        skip_import: bool,
    },

    /// Build animations from descriptor files found under a project root (indexed layout)
    Project {
        /// Project root to scan
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// File name suffix of descriptor files
        #[arg(long, default_value = DEFAULT_DESCRIPTOR_SUFFIX)]
        suffix: String,

        /// Build from this single descriptor file instead of scanning
        #[arg(long)]
        animations_meta: Option<PathBuf>,

        /// Resource store to write
        #[arg(short, long, default_value = DEFAULT_OUT)]
        out: PathBuf,
    },

    /// Import pictures, spritesheets and textures into an indexed store
    Import {
        /// Directory of picture files
        #[arg(long)]
        pictures: Option<PathBuf>,

        /// Spritesheet cell-size metadata file
        #[arg(long)]
        spritesheets_meta: Option<PathBuf>,

        /// Texture metadata file
        #[arg(long)]
        textures_meta: Option<PathBuf>,

        /// Resource store to write
        #[arg(short, long, default_value = DEFAULT_OUT)]
        out: PathBuf,
    },

    /// List the buckets and records of a resource store
    Inspect {
        /// Resource store to read
        #[arg(short, long, default_value = DEFAULT_OUT)]
        store: PathBuf,

        /// Only list this bucket (spritesheets, textures, pictures, animations, tags)
        #[arg(short, long)]
        bucket: Option<Bucket>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

const MIB: usize = 1024 * 1024;

/// Accepts a positive MiB count whose byte size fits in `usize`.
fn parse_map_size_mb(value: &str) -> Result<usize, String> {
    let mb: usize = value.parse().map_err(|e| format!("{}", e))?;
    if mb == 0 {
        return Err("map size must be at least 1 MiB".to_string());
    }
    mb.checked_mul(MIB)
        .map(|_| mb)
        .ok_or_else(|| format!("{} MiB exceeds the addressable map size", mb))
}

impl Cli {
    fn store_options(&self) -> StoreOptions {
        match self.map_size_mb {
            Some(mb) => StoreOptions {
                map_size: mb.saturating_mul(MIB),
            },
            None => StoreOptions::default(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let store = cli.store_options();

    let result = match cli.command {
        Commands::Pack {
            spritesheets,
            animations_meta,
            spritesheets_meta,
            out,
            skip_import,
        } => commands::pack::run(
            &spritesheets,
            &animations_meta,
            &spritesheets_meta,
            &out,
            skip_import,
            store,
        ),
        Commands::Project {
            root,
            suffix,
            animations_meta,
            out,
        } => commands::project::run(&root, &suffix, animations_meta.as_deref(), &out, store),
        Commands::Import {
            pictures,
            spritesheets_meta,
            textures_meta,
            out,
        } => commands::import::run(
            pictures.as_deref(),
            spritesheets_meta.as_deref(),
            textures_meta.as_deref(),
            &out,
            store,
        ),
        Commands::Inspect {
            store: path,
            bucket,
            json,
        } => commands::inspect::run(&path, bucket, json, store),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            let label = format!("error[{}]", error_kind(&e).code());
            eprintln!("{}: {}", label.red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".dimmed(), cause);
            }
            ExitCode::from(1)
        }
    }
}
