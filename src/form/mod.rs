pub mod questions;
pub mod snapshot;
