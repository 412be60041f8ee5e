//! Logs command - show recent event log entries

use anyhow::Result;

use crate::output;

pub fn run(limit: usize, json: bool) -> Result<()> {
    let logger = super::get_logger()
        .ok_or_else(|| anyhow::anyhow!("Failed to open the event log"))?;

    let entries = logger.recent(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        output::info("No events logged yet.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Timestamp (ms)", "Event", "Command", "Error"]);
    for entry in &entries {
        table.add_row(vec![
            entry.timestamp.to_string(),
            entry.event.clone(),
            entry.command.clone().unwrap_or_default(),
            entry.error_message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
