// src/lib.rs

pub mod config;
pub mod generate;
pub mod intent;
pub mod memory;
pub mod mood;
pub mod persona;
pub mod pipeline;
pub mod provider;
pub mod repl;
pub mod safety;
pub mod surprise;
