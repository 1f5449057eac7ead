use anyhow::Result;

use crate::api::{Order, OrdersApi};
use crate::cli::commands::with_task_board;
use crate::config::InkflowConfig;
use crate::workflow::{resolve_assignments, unassigned_required_stages, OrderItem};

pub struct ShowCommand {
    pub order_id: String,
}

impl ShowCommand {
    pub async fn execute(&self, config: &InkflowConfig) -> Result<()> {
        let current_user = config.user.id.clone();

        with_task_board(config, |board| async move {
            let order = board.api().fetch_order(&self.order_id).await?;
            print_order(&order, current_user.as_deref());
            Ok::<(), anyhow::Error>(())
        })
        .await
    }
}

fn print_order(order: &Order, current_user: Option<&str>) {
    println!("📦 Order #{} ({})", order.order_number_label(), order.id);
    println!("   Client: {}", order.client_name().unwrap_or_else(|| "-".to_string()));
    println!("   Due: {}", order.due_date().unwrap_or("-"));
    println!("   Priority: {}", order.priority());

    for item in &order.items {
        println!();
        print_item(item, current_user);
    }
}

fn print_item(item: &OrderItem, current_user: Option<&str>) {
    println!(
        "  • {} x{} [{}] (item {})",
        item.product_name().unwrap_or("Unknown product"),
        item.quantity,
        item.item_status,
        item.id.as_deref().unwrap_or("-")
    );

    if !item.disabled_stages.is_empty() {
        let skipped: Vec<String> = item.disabled_stages.iter().map(|s| s.label()).collect();
        println!("    Skips: {}", skipped.join(", "));
    }

    for stage in item.assignable_stages() {
        let holder = item
            .assignment_for(stage)
            .and_then(|a| a.assignee_id())
            .unwrap_or("-");
        let notes = item
            .assignment_for(stage)
            .and_then(|a| a.stage_notes.as_deref())
            .filter(|n| !n.is_empty())
            .map(|n| format!(" ({n})"))
            .unwrap_or_default();
        let here = if stage == item.item_status { "▶" } else { " " };
        println!("    {here} {:<10} {holder}{notes}", stage.label());
    }

    let resolved = resolve_assignments(item, current_user);
    let open = unassigned_required_stages(item, &resolved);
    if !open.is_empty() {
        let names: Vec<String> = open.iter().map(|s| s.label()).collect();
        println!("    ⚠️  No assignee on save: {}", names.join(", "));
    }
}
