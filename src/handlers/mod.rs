// src/handlers/mod.rs

pub mod admin;
pub mod content;
pub mod survey;
