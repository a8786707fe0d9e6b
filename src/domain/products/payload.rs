//! Inline `data:<mime>;base64,<body>` payloads accepted on product creation.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use rand::Rng;

const SCHEME: &str = "data:";
const DELIMITER: &str = ";base64,";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Padding is stripped before decoding and dangling bits are accepted, so any
// filtered body decodes.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid data URL: {0}")]
    InvalidFormat(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    mime_type: String,
    bytes: Vec<u8>,
}

impl EncodedPayload {
    pub fn parse(input: &str) -> Result<Self, PayloadError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or(PayloadError::InvalidFormat("missing `data:` scheme"))?;
        let mut parts = rest.split(DELIMITER);
        let (Some(header), Some(body), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PayloadError::InvalidFormat(
                "expected exactly one `;base64,` delimiter",
            ));
        };
        Ok(Self {
            mime_type: header.trim().to_string(),
            bytes: decode_lenient(body),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Declared type, or `application/octet-stream` when the header was empty.
    pub fn content_type(&self) -> &str {
        if self.mime_type.is_empty() {
            FALLBACK_CONTENT_TYPE
        } else {
            &self.mime_type
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn extension(&self) -> &'static str {
        extension_for(&self.mime_type)
    }

    /// `<unix-ms>-<token>.<ext>`; unique with high probability only.
    pub fn object_key(&self) -> String {
        let now_ms = chrono::Utc::now().timestamp_millis();
        build_object_key(now_ms, &mut rand::thread_rng(), self.extension())
    }
}

pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "application/pdf" => "pdf",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

fn build_object_key<R: Rng + ?Sized>(now_ms: i64, rng: &mut R, extension: &str) -> String {
    let len = rng.gen_range(6..=7);
    let token: String = (0..len)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect();
    format!("{now_ms}-{token}.{extension}")
}

/// Drops everything outside the base64 alphabet (url-safe symbols are mapped
/// to their standard counterparts) and decodes what remains.
fn decode_lenient(body: &str) -> Vec<u8> {
    let mut filtered: Vec<u8> = body
        .bytes()
        .take_while(|b| *b != b'=')
        .filter_map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => Some(b),
            b'-' => Some(b'+'),
            b'_' => Some(b'/'),
            _ => None,
        })
        .collect();
    // a lone trailing symbol carries fewer than 8 bits
    if filtered.len() % 4 == 1 {
        filtered.pop();
    }
    LENIENT.decode(&filtered).unwrap_or_default()
}
