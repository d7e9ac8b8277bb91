pub mod component;
pub mod distributor;
pub mod error;
pub mod generator;
pub mod monitor;
pub mod sim;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
