use depvet::adapters::outbound::network::DEFAULT_TTL;
use depvet::cli::Args;
use depvet::config::{self, ConfigFile};
use depvet::prelude::*;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // Parse command-line arguments; clap exits with code 2 on usage errors
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Effective settings after merging command-line arguments, the config
/// file, and built-in defaults, in that order of precedence.
struct Settings {
    registry: String,
    concurrency: usize,
    cache_ttl: Duration,
    include_dev: bool,
    output: Option<PathBuf>,
    policy_path: Option<PathBuf>,
    policy_name: Option<String>,
}

impl Settings {
    fn merge(args: &Args, config: ConfigFile) -> Self {
        let include_dev = if args.skip_dev {
            false
        } else {
            config.include_dev.unwrap_or(true)
        };

        Self {
            registry: args
                .registry
                .clone()
                .or(config.registry)
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            concurrency: args
                .concurrency
                .or(config.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            cache_ttl: args
                .cache_ttl
                .or(config.cache_ttl_seconds)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TTL),
            include_dev,
            output: args.output.clone().or(config.output).map(PathBuf::from),
            policy_path: args.policy.clone().or(config.policy).map(PathBuf::from),
            policy_name: args.policy_name.clone().or(config.policy_name),
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    // Validate project directory
    let project_dir = args.path.as_deref().unwrap_or(".");
    let project_path = PathBuf::from(project_dir);

    validate_project_path(&project_path)?;

    // Merge settings: CLI over config file over defaults
    let config = config::discover_config(&project_path)?.unwrap_or_default();
    let settings = Settings::merge(&args, config);

    // Resolve the active policy, if any
    let (allowed_licenses, max_severity) = match resolve_active_policy(&settings)? {
        Some(policy) => (policy.allowed_licenses(), policy.max_severity()),
        None => (
            DEFAULT_ALLOWED_LICENSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            SeverityTier::None,
        ),
    };

    // Create adapters (Dependency Injection)
    let manifest_reader = FileSystemReader::new();
    let cache = Arc::new(RegistryCache::with_ttl(settings.cache_ttl));
    let registry = CachingRegistry::with_cache(
        NpmRegistryClient::with_registry(settings.registry.as_str())?,
        cache,
    );
    let advisory_source = BulkAdvisoryClient::with_registry(settings.registry.as_str())?;
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = AuditDependenciesUseCase::new(
        manifest_reader,
        registry,
        advisory_source,
        progress_reporter,
    );

    // Create request
    let request = ScanRequest::new(project_path, settings.include_dev, allowed_licenses)
        .with_concurrency(settings.concurrency);

    // Execute use case
    let response = use_case.execute(request).await?;

    // Serialize the report
    let report = serde_json::to_string_pretty(&response)?;

    // Present output
    let presenter: Box<dyn OutputPresenter> = match settings.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&report)?;

    print_summary(&response);

    if response.has_findings(max_severity) {
        Ok(ExitCode::FindingsDetected)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Loads and resolves the policy set, then picks the one to apply.
///
/// Selection order: the explicit --policy-name, then the only policy if
/// exactly one is defined, then a policy literally named "default".
fn resolve_active_policy(settings: &Settings) -> Result<Option<ResolvedPolicy>> {
    let Some(ref policy_path) = settings.policy_path else {
        if settings.policy_name.is_some() {
            anyhow::bail!(
                "--policy-name was given without a policy file.\n\n\
                 💡 Hint: Pass --policy <PATH> pointing to a policy file or directory."
            );
        }
        return Ok(None);
    };

    let set = PolicyStore::new().load(policy_path)?;
    let resolver = PolicyResolver::new();
    let mut resolved = resolver.resolve_all(&set)?;

    let name = match settings.policy_name.as_deref() {
        Some(name) => name.to_string(),
        None if resolved.len() == 1 => resolved
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "default".to_string()),
        None if resolved.contains_key("default") => "default".to_string(),
        None => {
            let names: Vec<&str> = set.names().collect();
            anyhow::bail!(
                "Multiple policies are defined; pick one with --policy-name.\n\
                 Available policies: {}",
                names.join(", ")
            );
        }
    };

    match resolved.remove(&name) {
        Some(policy) => Ok(Some(policy)),
        None => {
            let names: Vec<&str> = set.names().collect();
            anyhow::bail!(
                "Policy '{}' is not defined. Available policies: {}",
                name,
                names.join(", ")
            )
        }
    }
}

fn print_summary(response: &ScanResponse) {
    let summary = &response.summary;
    eprintln!();
    eprintln!(
        "   {} up-to-date, {} outdated, {} errored, {} non-compliant, {} vulnerable",
        summary.up_to_date.green(),
        summary.outdated.yellow(),
        summary.version_errors.yellow(),
        summary.non_compliant.red(),
        summary.vulnerable.red(),
    );
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| AuditError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    // Security check: Canonicalize path to prevent path traversal
    let canonical_path = path
        .canonicalize()
        .map_err(|e| AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    if !canonical_path.is_dir() {
        return Err(AuditError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Resolved path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
