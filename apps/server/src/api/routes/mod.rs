//! Route definitions

pub mod carts;
pub mod metrics;
pub mod products;
