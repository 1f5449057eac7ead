use anyhow::Result;

use crate::api::ApiClient;
use crate::config::InkflowConfig;
use crate::dashboard::TaskBoard;
use crate::workflow::Stage;

pub mod advance;
pub mod claim;
pub mod show;
pub mod stages;
pub mod tasks;

/// Build a task board against the configured API and hand it to `f`
pub async fn with_task_board<F, Fut, R>(config: &InkflowConfig, f: F) -> Result<R>
where
    F: FnOnce(TaskBoard<ApiClient>) -> Fut,
    Fut: std::future::Future<Output = Result<R>>,
{
    let client = ApiClient::new(&config.api)?;
    tracing::debug!(base_url = client.base_url(), "Connecting to Orders API");
    f(TaskBoard::new(client, config.viewer())).await
}

pub fn parse_stage(input: &str) -> Result<Stage> {
    input.parse::<Stage>().map_err(|e| {
        let names: Vec<&str> = Stage::CATALOG.iter().map(|s| s.as_str()).collect();
        anyhow::anyhow!("{e}. Known stages: {}", names.join(", "))
    })
}

pub fn show_how_to_get_work() -> Result<()> {
    println!("🖨️  inkflow - print-shop production board");
    println!();
    println!("To get started:");
    println!("  📋 inkflow tasks                       # Your board");
    println!("  🙋 inkflow claim <order> <item>        # Take an unassigned item");
    println!("  ➡️  inkflow advance <order> <item> <stage>  # Move an item along");
    println!("  🔍 inkflow show <order>                # Inspect an order");
    println!();
    println!("Configure the API with NEXT_PUBLIC_API_BASE_URL (or api.base_url in inkflow.toml)");
    println!("and your employee id with INKFLOW_USER_ID.");
    Ok(())
}
