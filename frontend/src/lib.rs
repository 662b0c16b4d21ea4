pub mod app;
pub mod config;
pub mod debounce;
pub mod hooks;
pub mod persistence;
pub mod ports;
pub mod web;

pub use app::App;
