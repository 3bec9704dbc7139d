pub mod batch;
pub mod pool;

pub use batch::{calculate_all, calculate_batch};
pub use pool::WorkerPool;
