// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Payload compression.

Payloads are zlib-wrapped deflate streams. The generator compresses at the
highest level since the cost is paid once at build time.
*/

use {
    crate::error::{Result, RomfsError},
    flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status},
    std::io::Write,
};

/// Compress a sentinel-terminated payload at maximum compression.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2 + 16),
        Compression::best(),
    );

    encoder
        .write_all(data)
        .map_err(|e| RomfsError::Compression(e.to_string()))?;

    encoder
        .finish()
        .map_err(|e| RomfsError::Compression(e.to_string()))
}

/// Decompress a payload produced by [compress].
///
/// Truncated or corrupt streams are an error. Partial output is never returned.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len() * 2 + 64);

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity());
        }

        let before_in = decoder.total_in();
        let before_out = decoder.total_out();

        let status = decoder
            .decompress_vec(
                &data[before_in as usize..],
                &mut out,
                FlushDecompress::None,
            )
            .map_err(|e| RomfsError::Decompression(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                // A stream that stops making progress with output space left
                // has run out of input before its end marker.
                let stalled =
                    decoder.total_in() == before_in && decoder.total_out() == before_out;

                if stalled && out.len() < out.capacity() {
                    return Err(RomfsError::Decompression(
                        "truncated deflate stream".to_string(),
                    ));
                }
            }
        }
    }
}
