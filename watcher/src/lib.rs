pub mod abi;
pub mod chain;
pub mod chains;
pub mod config;
pub mod errors;
pub mod reconstruct;
pub mod types;
pub mod view;
pub mod watcher;
