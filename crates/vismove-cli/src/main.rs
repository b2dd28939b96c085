use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vismove_core::config::{Category, SuiNetwork};
use vismove_core::explainer::ViewMode;
use vismove_core::wallet::WalletAccount;
use vismove_infrastructure::ConfigService;

mod bootstrap;
mod commands;
mod output;
mod signer;

use bootstrap::AppBootstrap;
use commands::explain::ExplainArgs;

const DEFAULT_LOG_FILTER: &str = "warn,vismove_core::store=off";

#[derive(Parser)]
#[command(name = "vismove")]
#[command(about = "VisMove - explore, explain and rate Sui Move packages", long_about = None)]
struct Cli {
    /// Wallet address acting as the connected account
    #[arg(long, global = true, env = "VISMOVE_ADDRESS", value_parser = WalletAccount::parse)]
    address: Option<WalletAccount>,

    /// Network to use instead of the configured one
    #[arg(long, global = true, value_parser = SuiNetwork::from_str)]
    network: Option<SuiNetwork>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the modules of a package
    Modules { package_id: String },
    /// List the functions of a package module
    Functions { package_id: String, module: String },
    /// Explain a function (needs OPENAI_API_KEY)
    Explain {
        package_id: String,
        module: String,
        function: String,
        /// Which part of the explanation to print: function or coin-flow
        #[arg(long, default_value = "function", value_parser = ViewMode::from_str)]
        view: ViewMode,
        /// Save the explanation on chain under this title
        #[arg(long)]
        save: Option<String>,
    },
    /// Register a profile for the connected wallet
    Register { username: String },
    /// Add a category preference to the connected wallet's profile
    AddPreference { preference: String },
    /// Rate an existing explanation (1-5)
    Rate { explanation_id: String, rating: u64 },
    /// Show the connected wallet's profile
    Profile,
    /// List explanations owned by the connected wallet
    Explanations,
    /// Show registry statistics
    Stats,
    /// List explanation ids in a category
    ByCategory {
        #[arg(value_parser = Category::from_str)]
        category: Category,
    },
    /// List well-known packages
    Packages,
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_service = ConfigService::new();

    match &cli.command {
        Commands::Packages => return commands::registry::packages(),
        Commands::Config { init } => return commands::config::run(&config_service, *init),
        _ => {}
    }

    let bootstrap = AppBootstrap::new(&config_service, cli.network)?;
    bootstrap.connect(cli.address.clone()).await;

    match cli.command {
        Commands::Modules { package_id } => {
            commands::explain::modules(&bootstrap, &package_id).await?
        }
        Commands::Functions { package_id, module } => {
            commands::explain::functions(&bootstrap, &package_id, &module).await?
        }
        Commands::Explain {
            package_id,
            module,
            function,
            view,
            save,
        } => {
            commands::explain::explain(
                &bootstrap,
                ExplainArgs {
                    package_id: &package_id,
                    module: &module,
                    function: &function,
                    view,
                    save: save.as_deref(),
                },
            )
            .await?
        }
        Commands::Register { username } => {
            commands::account::register(&bootstrap, &username).await?
        }
        Commands::AddPreference { preference } => {
            commands::account::add_preference(&bootstrap, &preference).await?
        }
        Commands::Rate {
            explanation_id,
            rating,
        } => commands::registry::rate(&bootstrap, &explanation_id, rating).await?,
        Commands::Profile => commands::account::profile(&bootstrap).await?,
        Commands::Explanations => commands::account::explanations(&bootstrap).await?,
        Commands::Stats => commands::registry::stats(&bootstrap).await?,
        Commands::ByCategory { category } => {
            commands::registry::by_category(&bootstrap, category).await?
        }
        Commands::Packages | Commands::Config { .. } => {}
    }

    output::print_notifications(&bootstrap.session.store().drain_notifications());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const USER: &str = "0x123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_explain_with_options() {
        let cli = Cli::try_parse_from([
            "vismove",
            "--network",
            "mainnet",
            "explain",
            "0x1eab",
            "pool",
            "swap",
            "--view",
            "coin-flow",
            "--save",
            "Swap explained",
        ])
        .unwrap();

        assert_eq!(cli.network, Some(SuiNetwork::Mainnet));
        match cli.command {
            Commands::Explain { view, save, .. } => {
                assert_eq!(view, ViewMode::CoinFlow);
                assert_eq!(save.as_deref(), Some("Swap explained"));
            }
            _ => panic!("expected explain"),
        }
    }

    #[test]
    fn test_explain_has_no_rate_flag() {
        let result = Cli::try_parse_from([
            "vismove", "explain", "0x1eab", "pool", "swap", "--save", "T", "--rate", "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_address_must_be_full_length() {
        assert!(Cli::try_parse_from(["vismove", "--address", "0x123", "profile"]).is_err());

        let cli = Cli::try_parse_from(["vismove", "--address", USER, "profile"]).unwrap();
        assert_eq!(cli.address.unwrap().address, USER);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let cli = Cli::try_parse_from(["vismove", "by-category", "defi"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::ByCategory {
                category: Category::DeFi
            }
        ));
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        assert!(Cli::try_parse_from(["vismove", "--network", "moon", "stats"]).is_err());
    }
}
