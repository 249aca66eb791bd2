pub mod archive;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod resolver;
