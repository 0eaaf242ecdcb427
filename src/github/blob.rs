// src/github/blob.rs
// =============================================================================
// Downloads one template and turns it into raw bytes.
//
// GitHub's blob endpoint answers with JSON like:
//   {"sha": "...", "encoding": "base64", "content": "IyBCaW5h\nY...", "size": 312}
//
// The base64 payload is wrapped at 60 columns with '\n', so whitespace is
// dropped before decoding. Any encoding other than "base64" is refused.
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use super::client::{Blob, TemplateSource};
use crate::error::{AppError, RemoteError};

/// The only blob encoding we know how to decode.
const SUPPORTED_ENCODING: &str = "base64";

/// Fetches the blob `sha` and returns its decoded content.
pub async fn fetch_content<S>(source: &S, sha: &str) -> Result<Vec<u8>, AppError>
where
    S: TemplateSource + ?Sized,
{
    let blob = source.get_blob(sha).await.map_err(AppError::RemoteFetch)?;
    debug!(sha = %blob.sha, size = ?blob.size, encoding = %blob.encoding, "downloaded blob");

    decode_blob(&blob)
}

/// Decodes a blob's payload according to its declared encoding.
pub fn decode_blob(blob: &Blob) -> Result<Vec<u8>, AppError> {
    if blob.encoding != SUPPORTED_ENCODING {
        return Err(AppError::UnsupportedEncoding(blob.encoding.clone()));
    }

    let compact: Vec<u8> = blob
        .content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact)
        .map_err(|e| AppError::RemoteFetch(RemoteError::Decode(e)))
}
