//! Text-generation provider clients

pub mod groq;

pub use groq::{GroqClient, ProviderError};
