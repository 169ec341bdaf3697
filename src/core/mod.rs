pub mod acquire;
pub mod config;
pub mod download;
pub mod extract;
pub mod interface;
pub mod split;
pub mod stats;
