//! strata - Entry Point
//!
//! Composes a registration manifest into the in-memory container and prints
//! the resulting graph. Wiring mistakes (a decorator without a base, a
//! duplicate under the `throw` policy, ...) fail the command.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `strata app.toml` | Text report of the composed graph |
//! | `strata app.json --format json` | JSON report |
//! | `strata app.toml --condition prod --export-only` | Exported records active under `prod` |

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strata::GraphReport;
use strata::infrastructure::config::ConfigLoader;
use strata::infrastructure::logging::init_logging;
use strata::infrastructure::{Composer, RegistrationManifest};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Command line interface for strata
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "strata - compose and inspect registration manifests")]
#[command(version)]
struct Cli {
    /// Registration manifest (.toml or .json)
    manifest: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional active condition tag (repeatable)
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only report records flagged for visualization export
    #[arg(long)]
    export_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    config.composition.active_conditions.extend(cli.conditions);
    init_logging(&config.logging)?;

    let manifest = RegistrationManifest::load(&cli.manifest)?;
    let composer = Composer::from_app_config(&config);
    let mut services = composer.collection();
    let composition = composer.compose_manifest(&manifest, &mut services)?;

    let report = GraphReport::from_composition(&composition, cli.export_only);
    match cli.format {
        Format::Text => print!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
