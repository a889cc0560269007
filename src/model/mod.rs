pub mod project;
pub mod task;

pub use project::Project;
pub use task::{display_order, Task, TASK_PALETTE};
