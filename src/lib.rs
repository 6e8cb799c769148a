// The binary in main.rs drives the terminal; everything it uses lives here so
// integration tests and benchmarks can reach it as `wordrill::*`.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod event;
pub mod session;
pub mod store;
pub mod ui;
