pub mod bce;
pub mod mse;
pub mod task_kind;

pub use bce::BceLoss;
pub use mse::MseLoss;
pub use task_kind::{TaskKind, sigmoid};
