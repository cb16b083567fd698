//! Library components of the `udf` command-line tool.

pub mod args;
pub mod config;
pub mod loaders;
pub mod logging;
