use clap::Parser;
use std::path::PathBuf;

/// FormForge - generates JSON Forms schema/uischema pairs from declarative
/// form descriptors
#[derive(Parser, Debug, Clone)]
#[command(name = "formforge", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMFORGE_CONFIG", default_value = "formforge.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "FORMFORGE_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "FORMFORGE_PORT")]
    pub port: Option<u16>,
}
