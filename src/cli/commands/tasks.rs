use anyhow::Result;

use crate::cli::commands::{parse_stage, with_task_board};
use crate::config::InkflowConfig;
use crate::dashboard::Task;

pub struct TasksCommand {
    pub stage: Option<String>,
    pub json: bool,
}

impl TasksCommand {
    pub fn new(stage: Option<String>, json: bool) -> Self {
        Self { stage, json }
    }

    pub async fn execute(&self, config: &InkflowConfig) -> Result<()> {
        let filter = self.stage.as_deref().map(parse_stage).transpose()?;
        let viewer = config.viewer();
        if !viewer.is_admin && viewer.id.trim().is_empty() {
            anyhow::bail!("No employee id configured; set INKFLOW_USER_ID or user.id in inkflow.toml");
        }

        with_task_board(config, |mut board| async move {
            board.refresh(&config.page_settings()).await?;

            let tasks: Vec<&Task> = board
                .tasks()
                .iter()
                .filter(|t| filter.map_or(true, |stage| stage == t.current_stage))
                .collect();

            if self.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
                return Ok(());
            }

            if tasks.is_empty() {
                println!("📋 Nothing on your board right now");
                return Ok(());
            }

            for (stage, column) in board.columns() {
                if filter.is_some_and(|wanted| wanted != stage) {
                    continue;
                }
                println!();
                println!("== {} ({}) ==", stage, column.len());
                for task in column {
                    print_task(task);
                }
            }
            println!();
            println!("📈 {} task(s)", tasks.len());
            Ok::<(), anyhow::Error>(())
        })
        .await
    }
}

fn print_task(task: &Task) {
    let marker = if task.is_unassigned { "🙋" } else { "👤" };
    println!(
        "  {marker} #{} {} x{} for {} [{}]",
        task.order_number, task.product_name, task.quantity, task.client, task.priority
    );
    println!(
        "     order {} / item {} · due {} · {}",
        task.order_id,
        task.item_id,
        task.due_date.as_deref().unwrap_or("-"),
        task.assigned_to
    );
}
