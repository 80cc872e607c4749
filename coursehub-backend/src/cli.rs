use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "coursehub-backend", version, about = "CourseHub login service")]
pub struct CliArgs {
    /// Path to a TOML, YAML, or JSON configuration file.
    #[arg(short = 'c', long = "config-path", env = "COURSEHUB_CONFIG_PATH")]
    pub config_path: Option<String>,
}
