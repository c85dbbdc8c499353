//! GST tax computation for invoice lines

pub mod engine;

pub use engine::*;
