//! Invoice assembly: aggregation, cart drafting and the billing facade

pub mod aggregate;
pub mod cart;
pub mod core;

pub use aggregate::*;
pub use cart::*;
pub use self::core::*;
