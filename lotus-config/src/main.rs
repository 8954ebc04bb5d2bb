use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use lotus_config_core::loader;
use lotus_config_core::policy::DEFAULT_CC_LIFETIME_NETWORK_VERSION;
use lotus_config_core::{
    FullNode, MainnetPolicy, NetworkVersion, StorageMiner, TraversalBudget, UserRaftConfig,
};

#[derive(Parser)]
#[command(name = "lotus-config")]
#[command(about = "Print and check Lotus node configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the default configuration for a node role
    Default {
        #[arg(long, value_enum)]
        role: Role,

        #[arg(long, value_enum, default_value = "toml")]
        format: Format,

        /// Network version sizing the committed-capacity sector lifetime
        #[arg(long)]
        network_version: Option<u32>,
    },
    /// Load a configuration file over the role defaults and validate it
    Check {
        #[arg(long, value_enum)]
        role: Role,

        /// Print the effective configuration after a successful check
        #[arg(long)]
        print: bool,

        path: PathBuf,
    },
    /// Print the effective DAG traversal link budget
    TraversalBudget,
}

#[derive(Clone, Copy, ValueEnum)]
enum Role {
    Full,
    Miner,
    Cluster,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn render<T: serde::Serialize>(config: &T, format: Format) -> Result<String> {
    let text = match format {
        Format::Toml => loader::to_toml_string(config)?,
        Format::Json => loader::to_json_string(config)?,
    };
    Ok(text)
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("lotus_config_core=info".parse().context("Invalid log directive")?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Default {
            role,
            format,
            network_version,
        } => {
            let text = match role {
                Role::Full => render(&FullNode::defaults(), format)?,
                Role::Miner => {
                    let version = network_version
                        .map(NetworkVersion)
                        .unwrap_or(DEFAULT_CC_LIFETIME_NETWORK_VERSION);
                    let config = StorageMiner::defaults(&MainnetPolicy, version).with_context(|| {
                        format!("Failed to build miner defaults for {}", version)
                    })?;
                    render(&config, format)?
                }
                Role::Cluster => render(&UserRaftConfig::defaults(), format)?,
            };
            print!("{}", text);
        }
        Commands::Check { role, print, path } => {
            let text = match role {
                Role::Full => {
                    let config = loader::load_full_node(&path)?;
                    render(&config, Format::Toml)?
                }
                Role::Miner => {
                    let config = loader::load_storage_miner(&path)?;
                    render(&config, Format::Toml)?
                }
                Role::Cluster => {
                    let config = loader::load_user_raft(&path)?;
                    render(&config, Format::Toml)?
                }
            };

            info!(path = %path.display(), "Configuration is valid");
            if print {
                print!("{}", text);
            }
        }
        Commands::TraversalBudget => {
            let budget = TraversalBudget::from_env();
            println!("{}", budget.max_links());
        }
    }

    Ok(())
}
