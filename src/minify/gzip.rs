//! Gzip compression with [`flate2`].

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Gzip-compress `input` at the default compression level.
pub fn gzip(input: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(input)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_gzip_decodes_back() {
        let input = "var answer = 42;\n".repeat(64);
        let compressed = gzip(input.as_bytes()).unwrap();

        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
        assert!(compressed.len() < input.len());

        let mut decoded = String::new();
        GzDecoder::new(compressed.as_slice()).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, input);
    }
}
