// src/handlers/mod.rs

pub mod health;
pub mod pdfs;
pub mod process;
pub mod questions;
