#![warn(clippy::all, rust_2018_idioms)]

pub use app::App;
mod app;
pub mod config;

pub const APP_NAME: &str = "GeoTrace";
