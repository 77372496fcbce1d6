pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "skill-gate")]
#[command(about = "Validate a recorded skill request and dispatch it to the configured skill")]
pub struct CliConfig {
    #[arg(long, default_value = "skill-gate.toml", help = "Gate configuration file")]
    pub config: PathBuf,

    #[arg(long, help = "Recorded request file: {\"method\", \"headers\", \"body\"}")]
    pub request: PathBuf,

    #[arg(long, help = "Skip signature validation (development only)")]
    pub no_validate: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
