//! Application service layer - parking workflows, config, repository wiring

pub mod app;
pub mod config;
pub mod repository;
