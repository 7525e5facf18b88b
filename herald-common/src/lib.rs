mod common;
mod exception;
mod metadata;
mod utils;

pub use metadata::TaskType;
pub use utils::{EnvUtils, TaskUtils};

pub mod prelude;

#[macro_use]
pub(crate) mod macros;
