//! JSON wire form of an RF info packet.

use crate::packet::RfInfoPkt;
use frontend_core::FrontendError;
use thiserror::Error;

/// Packet codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes are not a JSON RF info packet
    #[error("Malformed RF info packet: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CodecError> for FrontendError {
    fn from(err: CodecError) -> Self {
        FrontendError::bad_parameter(err.to_string())
    }
}

/// Encode a packet to JSON bytes
pub fn encode(pkt: &RfInfoPkt) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(pkt)?)
}

/// Decode a packet from JSON bytes.
///
/// Missing fields take their default value. The decoded packet is not
/// validated; see [`RfInfoPkt::validate`].
pub fn decode(bytes: &[u8]) -> Result<RfInfoPkt, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}
