//! Herald — client and demo CLI for a hosted AI agent service.
//!
//! Provides a thin REST client for the service's agents, threads, streamed
//! runs, and file store, plus the orchestration loop that services tool
//! calls while a run streams.
//!
//! # Quick Start
//!
//! ```no_run
//! use herald::prelude::*;
//!
//! # async fn example() -> herald::error::Result<()> {
//! let config = Config::from_env()?;
//! let service = RestService::from_config(&config);
//! let registry = ToolRegistry::new();
//!
//! let thread = service.create_thread().await?;
//! service.create_message(&thread.id, Role::User, "Hello!").await?;
//! let run_id = RunDriver::new(&service, &registry)
//!     .drive(&thread.id, "agent_abc123")
//!     .await?;
//! println!("run {run_id} finished");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod run;
pub mod service;
pub mod session;
pub mod tools;
pub mod transcript;
pub mod types;
