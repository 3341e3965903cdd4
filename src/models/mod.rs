// src/models/mod.rs

pub mod answer;
pub mod content;
pub mod question;
pub mod response;
