use anyhow::Result;

use crate::cli::commands::{parse_stage, with_task_board};
use crate::config::InkflowConfig;

pub struct ClaimCommand {
    pub order_id: String,
    pub item_id: String,
    pub stage: Option<String>,
}

impl ClaimCommand {
    pub async fn execute(&self, config: &InkflowConfig) -> Result<()> {
        let requested = self.stage.as_deref().map(parse_stage).transpose()?;

        with_task_board(config, |mut board| async move {
            let stage = board.self_assign(&self.order_id, &self.item_id, requested).await?;
            println!(
                "🙋 {} is now yours on item {} (order {})",
                stage,
                self.item_id,
                self.order_id
            );
            Ok::<(), anyhow::Error>(())
        })
        .await
    }
}
