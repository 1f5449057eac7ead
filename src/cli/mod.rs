use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "inkflow")]
#[command(about = "Print-shop production board for the Orders API")]
#[command(long_about = "inkflow shows the order items waiting at each production stage, lets employees \
                       claim unassigned work and move items through the stages. Start with \
                       'inkflow tasks' to see your board.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show your task board (every item for admins)
    Tasks {
        /// Only show items currently at this stage
        #[arg(long, help = "Filter by stage, e.g. PRINTING or to-do")]
        stage: Option<String>,
        /// Print tasks as JSON
        #[arg(long, help = "Emit the task list as JSON instead of a table")]
        json: bool,
    },
    /// Move an order item to another stage
    Advance {
        /// Order id
        order_id: String,
        /// Item id within the order
        item_id: String,
        /// Target stage
        stage: String,
        /// Only allow forward moves along the item's production flow
        #[arg(long, help = "Reject moves the standard production flow does not allow")]
        strict: bool,
    },
    /// Claim a stage of an order item for yourself
    Claim {
        /// Order id
        order_id: String,
        /// Item id within the order
        item_id: String,
        /// Stage to claim (defaults to the item's current stage)
        #[arg(long, help = "Stage to claim; defaults to the item's current stage")]
        stage: Option<String>,
    },
    /// Show an order's items, skipped stages and assignments
    Show {
        /// Order id
        order_id: String,
    },
    /// List the production stages in order
    Stages,
}
