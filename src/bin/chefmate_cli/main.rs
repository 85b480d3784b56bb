// ABOUTME: ChefMate CLI - drives the API orchestrator from the command line
// ABOUTME: Recipe search, detail, AI tips and recipes, and API key management with JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Recipes using what is in the fridge
//! chefmate-cli search chicken rice --number 5
//!
//! # Full detail, then AI tips for it
//! chefmate-cli recipe 716429
//! chefmate-cli tips 716429 --have chicken --have garlic
//!
//! # Synthesize a recipe the provider could not find
//! chefmate-cli ai-recipe 999999 --name "Grandma's Lasagna"
//!
//! # Store keys for direct mode
//! chefmate-cli keys set spoonacular 0123456789abcdef0123456789abcdef
//! chefmate-cli keys status
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use chefmate::config::OrchestratorConfig;
use chefmate::http::ReqwestTransport;
use chefmate::logging::LoggingConfig;
use chefmate::orchestrator::{ApiOrchestrator, ApiService};
use chefmate::storage::JsonFileStore;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "chefmate-cli",
    about = "ChefMate recipe API command-line client",
    long_about = "Search recipes, fetch details, ask the AI chef for tips or a replacement recipe, and manage API keys."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Key storage file (defaults to the user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Skip the proxy and call providers directly
    #[arg(long, global = true)]
    direct: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Recipes that use the given ingredients
    Search {
        /// Ingredients on hand
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Maximum results
        #[arg(long, default_value = "12")]
        number: u32,

        /// Rank by fewest missing ingredients instead of most used
        #[arg(long)]
        minimize_missing: bool,

        /// Diet filter (e.g. vegetarian)
        #[arg(long)]
        diet: Option<String>,

        /// Comma-separated intolerances
        #[arg(long)]
        intolerances: Option<String>,
    },

    /// Full recipe detail
    Recipe {
        /// Provider recipe id
        id: String,
    },

    /// Nutrition widget for a recipe
    Nutrition {
        /// Provider recipe id
        id: String,
    },

    /// Free-text recipe search
    Query {
        /// Search text
        query: String,

        /// Maximum results
        #[arg(long, default_value = "12")]
        number: u32,

        /// Diet filter
        #[arg(long)]
        diet: Option<String>,

        /// Maximum minutes
        #[arg(long)]
        max_ready_time: Option<u32>,
    },

    /// Random recipes
    Random {
        /// Number of recipes
        #[arg(long, default_value = "6")]
        number: u32,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// AI cooking tips for a recipe
    Tips {
        /// Provider recipe id
        id: String,

        /// Ingredient you already have (repeatable)
        #[arg(long = "have")]
        have: Vec<String>,
    },

    /// Synthesize a recipe with the AI chef
    AiRecipe {
        /// Id of the recipe that could not be found
        id: String,

        /// Name the recipe might have
        #[arg(long)]
        name: Option<String>,
    },

    /// API key management
    Keys {
        #[command(subcommand)]
        action: KeysCommand,
    },
}

#[derive(Subcommand)]
enum KeysCommand {
    /// Validate and store a key
    Set {
        /// spoonacular or gemini
        service: ApiService,

        /// Key value
        key: String,

        /// Store as the Spoonacular backup key
        #[arg(long)]
        backup: bool,
    },

    /// Remove stored keys for a service
    Remove {
        /// spoonacular or gemini
        service: ApiService,
    },

    /// Show stored keys and setup status
    Status,

    /// Check a key's format without storing it
    Validate {
        /// spoonacular or gemini
        service: ApiService,

        /// Key value
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging.init()?;

    let mut config = OrchestratorConfig::from_env();
    if cli.direct {
        config.prefer_proxy = false;
    }
    let store = match cli.store {
        Some(path) => JsonFileStore::open(path)?,
        None => JsonFileStore::open_default()?,
    };
    debug!(store = %store.path().display(), "Opened key store");

    let http = Arc::new(ReqwestTransport::from_config(&config));
    let orchestrator = ApiOrchestrator::new(config, http, Arc::new(store))?;

    match cli.command {
        Command::Search {
            ingredients,
            number,
            minimize_missing,
            diet,
            intolerances,
        } => {
            commands::recipes::search(
                &orchestrator,
                &ingredients,
                number,
                minimize_missing,
                diet,
                intolerances,
            )
            .await?;
        }
        Command::Recipe { id } => commands::recipes::detail(&orchestrator, &id).await?,
        Command::Nutrition { id } => commands::recipes::nutrition(&orchestrator, &id).await?,
        Command::Query {
            query,
            number,
            diet,
            max_ready_time,
        } => {
            commands::recipes::query(&orchestrator, &query, number, diet, max_ready_time).await?;
        }
        Command::Random { number, tags } => {
            commands::recipes::random(&orchestrator, number, tags).await?;
        }
        Command::Tips { id, have } => commands::ai::tips(&orchestrator, &id, &have).await?,
        Command::AiRecipe { id, name } => {
            commands::ai::recipe(&orchestrator, &id, name.as_deref()).await?;
        }
        Command::Keys { action } => match action {
            KeysCommand::Set {
                service,
                key,
                backup,
            } => commands::keys::set(&orchestrator, service, &key, backup)?,
            KeysCommand::Remove { service } => commands::keys::remove(&orchestrator, service)?,
            KeysCommand::Status => commands::keys::status(&orchestrator)?,
            KeysCommand::Validate { service, key } => {
                commands::keys::validate(&orchestrator, service, &key)?;
            }
        },
    }

    Ok(())
}
