pub mod app;
pub mod common;
pub mod config;
pub mod model;
pub mod services;
