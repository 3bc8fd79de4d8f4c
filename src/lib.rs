pub mod ai;
pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod presenter;
pub mod types;
pub mod wasm;
