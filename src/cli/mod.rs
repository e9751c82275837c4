//! Console boundary: argument parsing and the numbered menu loop.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::catalog::PromptCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::service::AgentService;
use crate::session::run_prompt;
use crate::tools::ToolRegistry;

/// Herald demo CLI.
#[derive(Debug, Parser)]
#[command(name = "herald", about = "Demo CLI for a hosted AI agent service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available prompts.
    List,
    /// Run one prompt by key and exit.
    Run {
        /// Catalog key, e.g. `solveEquation`.
        key: String,
    },
}

/// Print the numbered prompt menu.
pub fn display_menu(catalog: &PromptCatalog) {
    println!("\nAvailable prompts:");
    println!("------------------");
    for (index, spec) in catalog.prompts().iter().enumerate() {
        println!(
            "{}. {} {}: {}",
            index + 1,
            spec.emoji,
            spec.title(),
            spec.prompt
        );
    }
    println!("{}. \u{1F44B} Exit", catalog.len() + 1);
}

/// List prompts by key, for `herald list`.
pub fn list_prompts(catalog: &PromptCatalog) {
    for spec in catalog.prompts() {
        println!("{:<20} {} {}", spec.key, spec.emoji, spec.prompt);
    }
}

/// Interactive selection loop. Per-prompt errors are logged and the menu
/// comes back; only reading stdin failing ends the loop early.
pub async fn menu_loop(
    service: &dyn AgentService,
    config: &Config,
    registry: &ToolRegistry,
    catalog: &PromptCatalog,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        display_menu(catalog);
        print!("\nSelect a prompt by number: ");
        use std::io::Write;
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break; // stdin closed
        };

        let Ok(selection) = line.trim().parse::<usize>() else {
            eprintln!("Invalid selection. Please enter a number between 1 and {}.", catalog.len() + 1);
            continue;
        };

        if selection == catalog.len() + 1 {
            println!("Exiting application.");
            break;
        }

        let Some(spec) = selection.checked_sub(1).and_then(|i| catalog.get(i)) else {
            eprintln!("Invalid selection. Please enter a number between 1 and {}.", catalog.len() + 1);
            continue;
        };

        if let Err(e) = run_prompt(service, config, registry, spec).await {
            error!(prompt = spec.key, error = %e, "prompt failed");
            eprintln!("Error processing prompt \"{}\": {e}", spec.key);
        }
    }

    Ok(())
}
