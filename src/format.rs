//! Decides the output extension from transformed bytes rather than the file name.

use std::path::Path;
use tracing::debug;

use crate::contract::Sniffer;

/// Formats whose destination name must be corrected after transformation.
const REWRITTEN_FORMATS: &[&str] = &["webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDecision {
    /// Extension with a leading dot: the sniffed one, else the source's (possibly empty).
    pub extension: String,
    /// Whether the destination file name must take `extension` instead of the source's.
    pub rewrite: bool,
}

pub fn resolve_extension(data: &[u8], original_path: &Path, sniffer: &dyn Sniffer) -> FormatDecision {
    match sniffer.sniff(data) {
        Some(ext) => {
            let rewrite = REWRITTEN_FORMATS.contains(&ext);
            debug!(path = %original_path.display(), detected = ext, rewrite, "Sniffed content type");
            FormatDecision {
                extension: format!(".{ext}"),
                rewrite,
            }
        }
        None => FormatDecision {
            extension: original_path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default(),
            rewrite: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::MagicSniffer;

    const WEBP: &[u8] = b"RIFF\x24\0\0\0WEBPVP8 ";

    #[test]
    fn webp_content_forces_rewrite() {
        let decision = resolve_extension(WEBP, Path::new("photo.png"), &MagicSniffer);
        assert_eq!(decision.extension, ".webp");
        assert!(decision.rewrite);
    }

    #[test]
    fn other_detected_formats_keep_source_name() {
        let decision = resolve_extension(b"\xff\xd8\xff\xe0", Path::new("photo.jpeg"), &MagicSniffer);
        assert_eq!(decision.extension, ".jpg");
        assert!(!decision.rewrite);
    }

    #[test]
    fn undetected_falls_back_to_original_extension() {
        let decision = resolve_extension(b"<svg/>", Path::new("icons/logo.svg"), &MagicSniffer);
        assert_eq!(
            decision,
            FormatDecision {
                extension: ".svg".into(),
                rewrite: false
            }
        );
        let bare = resolve_extension(b"text", Path::new("LICENSE"), &MagicSniffer);
        assert_eq!(bare.extension, "");
    }
}
