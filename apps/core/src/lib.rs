// J.A.R.V.I.S core
// Intent dispatch, confirmation queue and the device command bridge.

pub mod actors;
pub mod brain;
pub mod bridge;
pub mod codegen;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod utilities;

#[cfg(test)]
mod tests;
