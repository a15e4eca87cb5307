pub mod client;
pub mod dto;
pub mod error;
pub mod flow;
pub mod handler;
pub mod prompt;
pub mod schema;
pub mod service;

pub use client::{GenerationRequest, ModelProvider, ModelProviderRef, OpenAiClient};
pub use error::{FlowError, ProviderError};
pub use service::PreparednessAi;
