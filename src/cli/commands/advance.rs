use anyhow::{anyhow, Result};

use crate::api::OrdersApi;
use crate::cli::commands::{parse_stage, with_task_board};
use crate::config::InkflowConfig;
use crate::workflow::GuardedTransitions;

pub struct AdvanceCommand {
    pub order_id: String,
    pub item_id: String,
    pub stage: String,
    pub strict: bool,
}

impl AdvanceCommand {
    pub async fn execute(&self, config: &InkflowConfig) -> Result<()> {
        let stage = parse_stage(&self.stage)?;

        with_task_board(config, |mut board| async move {
            if self.strict {
                let order = board.api().fetch_order(&self.order_id).await?;
                let mut item = order
                    .item(&self.item_id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Item {} not found on order {}", self.item_id, self.order_id))?;
                // dry run against a copy; the server applies the real change
                item.transition_to(stage, &GuardedTransitions::print_shop())?;
            }

            board.update_status(&self.order_id, &self.item_id, stage).await?;
            println!("✅ Item {} on order {} moved to {}", self.item_id, self.order_id, stage);
            Ok::<(), anyhow::Error>(())
        })
        .await
    }
}
