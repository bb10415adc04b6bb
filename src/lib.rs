pub mod aggregate;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod process;
