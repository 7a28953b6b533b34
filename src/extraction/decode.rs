use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::extraction::DecodeError;

// Gmail emits URL-safe base64, sometimes padded and sometimes not.
const MESSAGE_BODY: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent)
);

/// Decodes the `payload.body.data` field of a mailbox message into text.
pub fn decode_message_body(data: &str) -> Result<String, DecodeError> {
    let bytes = MESSAGE_BODY.decode(data.trim())?;
    Ok(String::from_utf8(bytes)?)
}
