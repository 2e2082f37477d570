//! Signature based content sniffing.
//!
//! Only a handful of common image and document containers are recognised; anything
//! else (text, unknown binary layouts) reports `None` so callers keep the original
//! extension.

use crate::contract::Sniffer;

/// Detects formats by checking magic bytes at fixed offsets.
#[derive(Debug, Default, Clone, Copy)]
pub struct MagicSniffer;

struct Signature {
    ext: &'static str,
    offset: usize,
    magic: &'static [u8],
}

const fn sig(ext: &'static str, offset: usize, magic: &'static [u8]) -> Signature {
    Signature { ext, offset, magic }
}

const SIGNATURES: &[Signature] = &[
    sig("png", 0, b"\x89PNG\r\n\x1a\n"),
    sig("jpg", 0, b"\xff\xd8\xff"),
    sig("gif", 0, b"GIF87a"),
    sig("gif", 0, b"GIF89a"),
    sig("bmp", 0, b"BM"),
    sig("tif", 0, b"II*\0"),
    sig("tif", 0, b"MM\0*"),
    sig("ico", 0, b"\0\0\x01\0"),
    sig("pdf", 0, b"%PDF-"),
    sig("dds", 0, b"DDS "),
    sig("avif", 4, b"ftypavif"),
];

impl Sniffer for MagicSniffer {
    fn sniff(&self, data: &[u8]) -> Option<&'static str> {
        // RIFF containers carry the real type after the chunk size.
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some("webp");
        }
        SIGNATURES
            .iter()
            .find(|s| data.get(s.offset..s.offset + s.magic.len()) == Some(s.magic))
            .map(|s| s.ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_common_images() {
        let sniffer = MagicSniffer;
        assert_eq!(sniffer.sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), Some("png"));
        assert_eq!(sniffer.sniff(b"\xff\xd8\xff\xe0\0\x10JFIF"), Some("jpg"));
        assert_eq!(sniffer.sniff(b"RIFF\x24\0\0\0WEBPVP8 "), Some("webp"));
        assert_eq!(sniffer.sniff(b"\0\0\0\x1cftypavif"), Some("avif"));
    }

    #[test]
    fn unknown_or_short_input_is_none() {
        let sniffer = MagicSniffer;
        assert_eq!(sniffer.sniff(b"plain text"), None);
        assert_eq!(sniffer.sniff(b"RIFF\0\0\0\0WAVE"), None);
        assert_eq!(sniffer.sniff(b""), None);
        assert_eq!(sniffer.sniff(b"\x89PN"), None);
    }
}
