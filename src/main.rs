//! vpager - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vpager::model::SearchPattern;

/// vpager - page through text with regex search and a command line
#[derive(Parser, Debug)]
#[command(name = "vpager")]
#[command(version)]
#[command(about = "Terminal pager with regex search and an inline command line")]
pub struct Args {
    /// File to page through (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Ignore case when searching
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Columns moved by one horizontal shift
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub shift_width: Option<u32>,

    /// Start at the first line matching this pattern
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = vpager::config::load_config_with_precedence(args.config.clone())?;
        let merged = vpager::config::merge_config(config_file);
        let with_env = vpager::config::apply_env_overrides(merged);

        // Flags only override when given
        let ignore_case_override = args.ignore_case.then_some(true);
        let shift_width_override = args.shift_width.map(|w| w as usize);

        vpager::config::apply_cli_overrides(with_env, ignore_case_override, shift_width_override)
    };

    vpager::logging::init(&config.log_file_path, &config.log_level)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    // Reject a bad pattern before the terminal is taken over
    let initial_search = args
        .search
        .as_deref()
        .map(|expr| SearchPattern::with_options(expr, config.ignore_case))
        .transpose()?;

    let input_source = vpager::source::detect_input_source(args.file.clone())?;

    vpager::view::run_with_source(input_source, config, initial_search)?;

    Ok(())
}
