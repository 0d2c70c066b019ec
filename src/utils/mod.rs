// src/utils/mod.rs

pub mod filename;
