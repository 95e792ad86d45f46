/*!
error module defines the error types used in ris-bgpmap.
*/
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BgpmapError {
    /// The address or prefix given on the command line is malformed.
    ///
    /// ## Occurs during:
    ///  - Parsing of the query target, before any network request is made
    #[error("invalid address or prefix: {0}")]
    InvalidInput(String),
    /// The looking-glass endpoint could not be reached, or the request timed out.
    ///
    /// ## Occurs during:
    ///  - Sending the looking-glass request
    ///  - Reading the response body
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The looking-glass answered with a non-success status, an error message, or a payload
    /// that does not match the expected schema.
    #[error("looking glass API error: {0}")]
    Api(String),
    /// The looking-glass answered but no collector carries the queried resource.
    #[error("{0} is not found on RIPE NCC's RIS")]
    NotFound(String),
    /// An AS name lookup failed. This never ends a run; the name cache replaces it with a
    /// placeholder label.
    #[error("unable to resolve name of AS{asn}: {reason}")]
    Resolution { asn: u32, reason: String },
    /// The graph description was written but the layout tool could not turn it into an image.
    #[error("rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for BgpmapError {
    fn from(value: serde_json::Error) -> Self {
        BgpmapError::Api(format!("malformed payload: {}", value))
    }
}

impl From<oneio::OneIoError> for BgpmapError {
    fn from(value: oneio::OneIoError) -> Self {
        BgpmapError::Io(io::Error::other(value.to_string()))
    }
}

impl BgpmapError {
    /// Whether this error ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BgpmapError::Resolution { .. })
    }
}
