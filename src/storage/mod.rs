// src/storage/mod.rs

pub mod pdfs;
pub mod questions;
