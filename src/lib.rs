pub mod cli;
pub mod error;
pub mod factory;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

pub use error::WorkoutError;
pub use factory::{Clock, FixedClock, SystemClock, WorkoutFactory};
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend};
pub use store::{LoadOutcome, WorkoutStore};
pub use types::{Coords, Workout, WorkoutDetail, WorkoutKind};
