//! Herald CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use herald::catalog::PromptCatalog;
use herald::cli::{self, Cli, Commands};
use herald::config::Config;
use herald::service::RestService;
use herald::session::run_prompt;
use herald::tools::{builtin, ToolRegistry};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let catalog = PromptCatalog::builtin();

    if let Some(Commands::List) = args.command {
        cli::list_prompts(&catalog);
        return;
    }

    // configuration errors are fatal; everything later loops back to the menu
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut registry = ToolRegistry::new();
    for tool in builtin::all_tools() {
        if let Err(e) = registry.register(tool) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    let service = RestService::from_config(&config);

    let result = match args.command {
        Some(Commands::Run { key }) => match catalog.find(&key) {
            Some(spec) => run_prompt(&service, &config, &registry, spec).await,
            None => {
                eprintln!("Unknown prompt key: {key}");
                std::process::exit(1);
            }
        },
        Some(Commands::List) => unreachable!("handled above"),
        None => cli::menu_loop(&service, &config, &registry, &catalog).await,
    };

    if let Err(e) = result {
        eprintln!("The application encountered an error: {e}");
        std::process::exit(1);
    }
}
