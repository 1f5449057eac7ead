use anyhow::Result;
use clap::Parser;

use inkflow::cli::commands::{
    advance::AdvanceCommand, claim::ClaimCommand, show::ShowCommand, show_how_to_get_work, stages::list_stages,
    tasks::TasksCommand,
};
use inkflow::cli::{Cli, Commands};
use inkflow::{api_metrics, config, init_telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config()?;
    init_telemetry(&config.observability)?;

    let result = match cli.command {
        // Default behavior: no subcommand - explain how to get work
        None => show_how_to_get_work(),
        Some(Commands::Stages) => list_stages(),
        Some(Commands::Tasks { stage, json }) => TasksCommand::new(stage, json).execute(config).await,
        Some(Commands::Advance {
            order_id,
            item_id,
            stage,
            strict,
        }) => {
            AdvanceCommand {
                order_id,
                item_id,
                stage,
                strict,
            }
            .execute(config)
            .await
        }
        Some(Commands::Claim {
            order_id,
            item_id,
            stage,
        }) => {
            ClaimCommand {
                order_id,
                item_id,
                stage,
            }
            .execute(config)
            .await
        }
        Some(Commands::Show { order_id }) => ShowCommand { order_id }.execute(config).await,
    };

    api_metrics().log_stats();
    result
}
