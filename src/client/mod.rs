//! Client interface and factory for the document-AI API.

mod builder;
mod client;
mod traits;

pub use builder::DocAiClientBuilder;
pub use client::{create_client, create_client_from_env, DocAiClientImpl};
pub use traits::DocAiClient;
