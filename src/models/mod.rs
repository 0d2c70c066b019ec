// src/models/mod.rs

pub mod pdf;
pub mod process;
pub mod question;
