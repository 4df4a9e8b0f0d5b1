pub mod broker;
pub mod cli;
pub mod collector;
pub mod config;
pub mod filtering;
pub mod logging;
pub mod logscan;
pub mod metrics;
pub mod reporting;
