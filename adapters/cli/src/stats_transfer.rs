use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use word_siege_core::FinalStats;

const PAYLOAD_DOMAIN: &str = "siege";
const PAYLOAD_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded statistics.
pub(crate) const PAYLOAD_HEADER: &str = "siege:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes final round statistics into a single-line persistence payload.
pub(crate) fn encode(stats: &FinalStats) -> Result<String, StatsTransferError> {
    let json = serde_json::to_vec(stats).map_err(StatsTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{PAYLOAD_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes final round statistics from a persistence payload.
pub(crate) fn decode(value: &str) -> Result<FinalStats, StatsTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StatsTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().ok_or(StatsTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(StatsTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(StatsTransferError::MissingPayload)?;

    if domain != PAYLOAD_DOMAIN {
        return Err(StatsTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != PAYLOAD_VERSION {
        return Err(StatsTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(StatsTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(StatsTransferError::InvalidPayload)
}

/// Errors that can occur while transferring final statistics.
#[derive(Debug, Error)]
pub(crate) enum StatsTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("stats payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the payload.
    #[error("stats string is missing the prefix")]
    MissingPrefix,
    /// The payload did not contain a version segment.
    #[error("stats string is missing the version")]
    MissingVersion,
    /// The payload did not include the encoded statistics.
    #[error("stats string is missing the payload")]
    MissingPayload,
    /// The payload used an unexpected prefix segment.
    #[error("stats prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The payload used an unsupported version identifier.
    #[error("stats version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 segment could not be decoded.
    #[error("could not decode stats payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The statistics could not be serialised or deserialised.
    #[error("could not process stats payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}
