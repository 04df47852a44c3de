pub mod openai;

use crate::errors::ProviderError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// The resolver sends a single fully rendered prompt as one user-turn
/// message, so the interface is a single generate call.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates an answer for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

dyn_clone::clone_trait_object!(AiProvider);
