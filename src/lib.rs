pub mod app;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod validation;
pub mod views;
