pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod reconcile;
pub mod status;
pub mod tables;
