use anyhow::Result;
use holocal_core::config::HolocalConfig;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub async fn run(json: bool) -> Result<()> {
    let config = HolocalConfig::load()?;
    let service = super::connect(&config);

    let events = service.list_my_events().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} {}", events.len(), pluralize("event", events.len())).dimmed()
    );
    for event in &events {
        println!("   {}", event.render());
    }

    Ok(())
}
