// Task board: flattening orders into per-viewer tasks, and the status and
// self-assignment mutations triggered from it

pub mod board;
pub mod tasks;

pub use board::{claim_stage, BoardError, TaskBoard};
pub use tasks::{aggregate_tasks, group_by_stage, sort_for_board, Task, Viewer, ALL_USERS, NOT_ASSIGNED};
