//! Remote Azure DevOps Release API: wire shapes and the HTTP client.

pub mod http;
pub mod wire;
