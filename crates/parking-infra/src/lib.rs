//! Infrastructure layer - SQLite persistence, input readers, layout loader

pub mod input;
pub mod layout_loader;
pub mod persistence;
