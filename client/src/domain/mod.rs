//! Domain layer: models, commands, and the list-ordering rules.

pub mod commands;
pub mod models;
pub mod ordering;
