use reacji_common::{ClientResult, Params};

/// A reactions method call.
///
/// Implemented on the parameter object itself; it knows its endpoint, how to
/// encode itself, and how to decode the body of a successful response.
pub trait ReactionRequest {
    /// Web API method name, e.g. `reactions.add`
    const ENDPOINT: &'static str;

    /// Decoded result of a successful call
    type Output;

    /// Encode into wire parameters.
    fn to_params(&self) -> Params;

    /// Decode a response body whose envelope has already been checked.
    fn decode_output(body: &[u8]) -> ClientResult<Self::Output>;
}
