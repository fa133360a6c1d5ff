pub mod app;
pub mod binder;
pub mod cli;
pub mod config;
pub mod controls;
pub mod images;
pub mod output;
pub mod paginator;
pub mod repository;
pub mod runner;
pub mod session;

#[cfg(test)]
mod tests;
