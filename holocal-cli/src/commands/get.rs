use anyhow::Result;
use holocal_core::EntryHash;
use holocal_core::config::HolocalConfig;

use crate::render::Render;

pub async fn run(hash: &str, json: bool) -> Result<()> {
    let config = HolocalConfig::load()?;
    let service = super::connect(&config);

    let event = service.get_event(&EntryHash::from(hash)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", event.render());
    }

    Ok(())
}
