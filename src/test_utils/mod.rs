//! Test utilities: in-memory repositories, fixture factories and an `AppState` builder.

pub mod app_state_builder;
pub mod factories;
pub mod in_memory;

pub use app_state_builder::*;
pub use factories::*;
pub use in_memory::*;
