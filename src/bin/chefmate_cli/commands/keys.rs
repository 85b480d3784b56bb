// ABOUTME: API key management commands for chefmate-cli
// ABOUTME: Store, remove, validate, and report keys used for direct provider calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use chefmate::orchestrator::{ApiOrchestrator, ApiService};
use serde_json::json;

use crate::helpers::output::print_json;

pub fn set(orchestrator: &ApiOrchestrator, service: ApiService, key: &str, backup: bool) -> Result<()> {
    if backup {
        if service != ApiService::Spoonacular {
            bail!("Only Spoonacular supports a backup key");
        }
        orchestrator.set_backup_api_key(key)?;
    } else {
        orchestrator.set_api_key(service, key)?;
    }
    println!("Stored {service} key");
    Ok(())
}

pub fn remove(orchestrator: &ApiOrchestrator, service: ApiService) -> Result<()> {
    orchestrator.remove_api_key(service)?;
    println!("Removed {service} keys");
    Ok(())
}

pub fn status(orchestrator: &ApiOrchestrator) -> Result<()> {
    print_json(&json!({
        "spoonacular": orchestrator.has_api_key(ApiService::Spoonacular)?,
        "spoonacularKeys": orchestrator.recipe_keys().len(),
        "gemini": orchestrator.has_api_key(ApiService::Gemini)?,
        "setup": orchestrator.check_setup(),
    }))
}

pub fn validate(orchestrator: &ApiOrchestrator, service: ApiService, key: &str) -> Result<()> {
    print_json(&orchestrator.validate_api_key(service, key))
}
