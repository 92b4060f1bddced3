use anyhow::Result;
use holocal_core::CalendarView;
use holocal_core::config::HolocalConfig;
use owo_colors::OwoColorize;

pub fn run(
    dna: String,
    agent: String,
    conductor: Option<String>,
    view: Option<CalendarView>,
) -> Result<()> {
    let path = HolocalConfig::config_path()?;

    let mut config = HolocalConfig::new(dna, agent);
    if let Some(conductor) = conductor {
        config.conductor = conductor;
    }
    if let Some(view) = view {
        config.initial_view = view;
    }

    config.save_to(&path)?;

    println!("{} {}", "Wrote".green(), path.display());
    println!("   {} {}", "cell:".dimmed(), config.cell_id().dna_hash());
    println!("   {} {}", "agent:".dimmed(), config.agent_pub_key);
    println!("   {} {}", "conductor:".dimmed(), config.conductor);
    Ok(())
}
