//! Credential models and token endpoint response decoding.

pub mod credentials;
pub mod response;
pub mod secret;

pub use credentials::*;
pub use response::*;
pub use secret::*;
