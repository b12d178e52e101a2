pub mod dataset;
pub mod network;
pub mod predict;
pub mod snapshot;
pub mod train;
pub mod train_sse;
