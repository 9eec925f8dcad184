//! Application state module

mod app_state;
pub mod catalog;
mod forms;
pub mod validation;

pub use app_state::*;
pub use forms::*;
pub use validation::Violation;
