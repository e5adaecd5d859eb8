use clap::Parser;

/// Audit npm dependencies for updates, license compliance, and advisories
#[derive(Parser, Debug)]
#[command(name = "depvet")]
#[command(version = "0.4.0")]
#[command(
    about = "Audit npm dependencies for updates, license compliance, and advisories",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Policy file or directory of policy files (.json, .yml, .yaml)
    #[arg(long, value_name = "PATH")]
    pub policy: Option<String>,

    /// Name of the policy to apply when several are defined
    #[arg(long, value_name = "NAME")]
    pub policy_name: Option<String>,

    /// Base URL of the npm registry to query
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// Maximum number of registry requests in flight at once
    #[arg(short, long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// How long registry responses stay cached, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,

    /// Skip devDependencies and audit runtime dependencies only
    #[arg(long)]
    pub skip_dev: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
