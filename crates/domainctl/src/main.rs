//! domainctl - skill domain registry CLI
//!
//! Lists discovered domains and prints domain, skill, and resolved skill
//! config descriptors.

mod render;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use clap::{Parser, Subcommand};
use domain_core::config::ConfigError;
use domain_core::{Config, LangCode, ScanPolicy};
use domainctl::{DomainRegistry, RegistryError};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Discover skill domains and inspect their descriptors.
#[derive(Parser)]
#[command(name = "domainctl")]
#[command(about = "Inspect skill domains, skills, and skill configs")]
#[command(version)]
struct Cli {
    /// Working root that relative paths resolve against (default: current directory)
    #[arg(long, global = true, env = "DOMAINCTL_ROOT")]
    root: Option<PathBuf>,

    /// Config file path (overrides .skills/config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Domains root (overrides domains_dir)
    #[arg(long, global = true)]
    domains_dir: Option<PathBuf>,

    /// Shared data root (overrides shared_data_dir)
    #[arg(long, global = true)]
    shared_data_dir: Option<PathBuf>,

    /// Skip broken domains instead of failing the listing
    #[arg(long, global = true)]
    best_effort: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all domains with their skills
    Domains {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a domain descriptor
    Domain {
        /// Domain directory name
        domain: String,
    },

    /// Print a skill descriptor
    Skill {
        /// Domain directory name (declared name with --by-name)
        domain: String,

        /// Skill directory name (declared name with --by-name)
        skill: String,

        /// Resolve declared names through the registry
        #[arg(long)]
        by_name: bool,
    },

    /// Print a skill config with shared entities expanded
    Config {
        /// Path to the skill config file
        file: PathBuf,

        /// Language code for shared entities (default: default_lang)
        #[arg(long, value_parser = parse_lang)]
        lang: Option<LangCode>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_lang(s: &str) -> Result<LangCode, String> {
    s.parse().map_err(|e: domain_core::lang::LangError| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let registry = DomainRegistry::new(&config);

    match cli.command {
        Command::Domains { json } => {
            let result = registry.list_domains().await?;
            if json {
                let failures: Vec<_> = result
                    .failures
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "directory": f.directory,
                            "path": f.path.display().to_string(),
                            "error": f.error.to_string(),
                        })
                    })
                    .collect();
                let value = serde_json::json!({
                    "domains": serde_json::to_value(&result.registry)?,
                    "failures": failures,
                });
                render::print_json(&value)?;
            } else {
                render::print_domain_list(&result.registry);
                render::print_failures(&result.failures);
            }
        }
        Command::Domain { domain } => {
            render::print_json(&registry.domain_info(&domain).await?)?;
        }
        Command::Skill {
            domain,
            skill,
            by_name,
        } => {
            let info = if by_name {
                registry.skill_info_by_name(&domain, &skill).await?
            } else {
                registry.skill_info(&domain, &skill).await?
            };
            render::print_json(&info)?;
        }
        Command::Config { file, lang } => {
            let lang = lang.unwrap_or_else(|| config.default_lang.clone());
            render::print_json(&registry.skill_config(&file, &lang).await?)?;
        }
    }

    Ok(())
}

/// Build the effective config: defaults, then file, then CLI flags.
fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let mut config = Config::load(&root, cli.config.as_deref())?;
    if let Some(dir) = &cli.domains_dir {
        config.domains_dir = dir.clone();
    }
    if let Some(dir) = &cli.shared_data_dir {
        config.shared_data_dir = dir.clone();
    }
    if cli.best_effort {
        config.scan_policy = ScanPolicy::BestEffort;
    }
    config.resolve_paths(&root);

    Ok(config)
}
