// ABOUTME: Server binary for the Train AI workout relay
// ABOUTME: Loads configuration, initializes logging, and serves the HTTP API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Train AI Server Binary
//!
//! Starts the workout relay. Configuration comes from environment variables
//! (optionally seeded from an env file); a few CLI flags override them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use train_ai::{config::ServerConfig, logging, resources::ServerResources, server};

#[derive(Parser)]
#[command(name = "train-ai-server")]
#[command(about = "Train AI - workout plans from a fitness profile via a local LLM")]
pub struct Args {
    /// Load environment variables from this file before reading configuration
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.env_file {
        Some(path) => ServerConfig::from_env_file(path)?,
        None => ServerConfig::from_env()?,
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Train AI workout relay");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::new(config)?);
    server::run(resources).await
}
