//! Common plumbing for the reacji crates: the HTTP client seam, the request
//! executor that talks to the Web API, the response envelope, and the error types.

#![warn(missing_docs)]
pub use smol_str;
pub use url;

/// Success/failure envelope shared by every Web API response.
pub mod envelope;
pub mod error;
/// Request executor trait and its HTTP-backed implementation.
pub mod executor;
/// HTTP client abstraction used by the executor.
pub mod http_client;

pub use envelope::Envelope;
pub use error::{ClientError, ClientResult};
pub use executor::{Params, RequestExecutor, WebApi};
