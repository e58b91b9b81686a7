pub mod codec;
pub mod config;
pub mod handlers;
pub mod humanize;
pub mod model;
pub mod observability;
pub mod rollup;
pub mod worker;

#[cfg(test)]
mod testing;
