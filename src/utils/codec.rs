use crate::utils::error::{ClientError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub fn gunzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| ClientError::Decode {
            message: format!("gzip decompression failed: {}", e),
        })?;
    Ok(out)
}

/// Undo the transfer encoding of a response body.
///
/// The task server sets `Content-Encoding: gzip` on compressed replies, but
/// some of its handlers compress without the header, so the gzip magic is
/// honoured as well.
pub fn decode_body(data: &[u8], content_encoding: Option<&str>) -> Result<Vec<u8>> {
    let encoding = content_encoding
        .map(|e| e.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match encoding.as_str() {
        "gzip" | "x-gzip" => gunzip(data),
        "" | "identity" if is_gzip(data) => {
            tracing::debug!("Body carries gzip magic without Content-Encoding, decompressing");
            gunzip(data)
        }
        "" | "identity" => Ok(data.to_vec()),
        other => Err(ClientError::Decode {
            message: format!("unsupported Content-Encoding: {}", other),
        }),
    }
}
