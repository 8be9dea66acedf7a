//! Provider specific [`ClientWrapper`](crate::agentnet::client_wrapper::ClientWrapper)
//! implementations.
//!
//! Each submodule offers a concrete client that speaks a particular vendor's
//! API while conforming to the uniform agentnet contract. All three share the
//! OpenAI-compatible transport in [`openai_compat`].

pub mod common;
pub mod http_pool;
pub mod openai_compat;

pub mod deepseek;
pub mod gemini;
pub mod groq;
