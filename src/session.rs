//! One selected prompt, end to end: provision, run, render, clean up.

use std::io::Write;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{PromptSpec, ToolKind};
use crate::config::Config;
use crate::error::Result;
use crate::run::RunDriver;
use crate::service::{AgentService, CreateAgentRequest};
use crate::tools::provision::{provision, ProvisionedTools};
use crate::tools::ToolRegistry;
use crate::transcript::{collect_images, render_messages};
use crate::types::Role;

const AGENT_TEMPERATURE: f32 = 0.5;

/// Execute one prompt against a fresh agent and thread, then dispose of
/// the remote resources it created.
pub async fn run_prompt(
    service: &dyn AgentService,
    config: &Config,
    registry: &ToolRegistry,
    spec: &PromptSpec,
) -> Result<()> {
    println!("\n\u{2705} Selected: {} {}", spec.emoji, spec.title());
    println!(
        "\u{1F6E0} Tools: {}",
        spec.tool.map(|t| t.label()).unwrap_or("None")
    );
    println!("\u{1F4AC} Prompt: {}", spec.prompt);

    let provisioned = provision(service, config, registry, spec).await?;

    let agent = service
        .create_agent(&CreateAgentRequest {
            model: config.model.clone(),
            name: format!("agent-{}", spec.key),
            instructions: spec
                .instructions
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("You are a helpful agent that can assist with {}.", spec.key)
                }),
            temperature: AGENT_TEMPERATURE,
            tools: provisioned.definitions.clone(),
            tool_resources: provisioned.resources.clone(),
        })
        .await?;
    info!(agent_id = %agent.id, "created agent");

    let thread = service.create_thread().await?;
    service
        .create_message(&thread.id, Role::User, spec.prompt)
        .await?;

    let run_id = RunDriver::new(service, registry)
        .with_delta_sink(Arc::new(|fragment: &str| {
            print!("{fragment}");
            let _ = std::io::stdout().flush();
        }))
        .drive(&thread.id, &agent.id)
        .await?;

    let messages = service.list_messages(&thread.id).await?;
    print!("{}", render_messages(&messages));

    if spec.tool == Some(ToolKind::CodeInterpreter) && spec.file_path.is_some() {
        let saved = collect_images(service, &messages, &config.download_dir).await?;
        for path in &saved {
            println!("Saved image file to: {}", path.display());
        }
    }

    print_run_stats(service, &thread.id, &run_id).await?;

    dispose(service, &provisioned, &agent.id).await
}

async fn print_run_stats(
    service: &dyn AgentService,
    thread_id: &str,
    run_id: &str,
) -> Result<()> {
    if run_id.is_empty() {
        return Ok(());
    }
    let run = service.get_run(thread_id, run_id).await?;
    if let Some(usage) = run.usage {
        println!(
            "\nToken usage: {} prompt + {} completion = {} total",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }
    Ok(())
}

/// Delete the remote resources created for this prompt.
async fn dispose(
    service: &dyn AgentService,
    provisioned: &ProvisionedTools,
    agent_id: &str,
) -> Result<()> {
    if let Some(file_id) = &provisioned.uploaded_file_id {
        info!(%file_id, "deleting uploaded file");
        service.delete_file(file_id).await?;
    }
    info!(%agent_id, "deleting agent");
    service.delete_agent(agent_id).await
}
