//! Domain layer - models, fare calculation, and collaborator traits

pub mod clock;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
