use anyhow::Result;

use crate::workflow::Stage;

pub fn list_stages() -> Result<()> {
    println!("Production stages, in order:");
    for (position, stage) in Stage::CATALOG.iter().enumerate() {
        let kind = if stage.is_work_state() { "work" } else { "control" };
        println!("  {}. {:<10} {:<10} ({kind})", position + 1, stage.as_str(), stage.label());
    }
    Ok(())
}
