//! Decode-detect-save pipeline: Base64 text in, classified bytes out, and the
//! final write to disk.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};

use crate::error::ConvertError;

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
/// Every PDF starts with this marker, followed by the version.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// What the decoded bytes turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Png,
    Pdf,
    Unrecognized,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self.format() {
            Some(format) => format.label(),
            None => "unknown",
        }
    }

    /// The savable format, if the bytes are one.
    pub fn format(self) -> Option<Format> {
        match self {
            FileKind::Png => Some(Format::Png),
            FileKind::Pdf => Some(Format::Pdf),
            FileKind::Unrecognized => None,
        }
    }
}

/// A file format the decoded bytes can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Pdf,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Pdf => "PDF",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Pdf => "pdf",
        }
    }

    /// Suggested file name, e.g. `base64.png`.
    pub fn default_file_name(self) -> String {
        format!("base64.{}", self.extension())
    }

    /// Filter description shown next to the save prompt.
    pub fn filter_label(self) -> String {
        format!("{} Files (*.{})", self.label(), self.extension())
    }
}

/// Removes every line break and surrounding whitespace, undoing the wrapper.
pub fn normalize(text: &str) -> Result<String, ConvertError> {
    let stripped: String = text
        .trim()
        .chars()
        .filter(|&c| c != '\n' && c != '\r')
        .collect();
    if stripped.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(stripped)
}

/// Decodes standard, padded Base64.
pub fn decode(normalized: &str) -> Result<Vec<u8>, ConvertError> {
    Ok(general_purpose::STANDARD.decode(normalized)?)
}

/// Signature sniff: PNG is checked before PDF.
pub fn classify(bytes: &[u8]) -> FileKind {
    if bytes.starts_with(PNG_SIGNATURE) {
        FileKind::Png
    } else if bytes.starts_with(PDF_SIGNATURE) {
        FileKind::Pdf
    } else {
        FileKind::Unrecognized
    }
}

/// Decoded bytes of a savable format, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub format: Format,
    pub bytes: Vec<u8>,
}

impl Payload {
    /// Runs normalize, decode and classify over the buffer text.
    pub fn from_text(text: &str) -> Result<Self, ConvertError> {
        let normalized = normalize(text)?;
        let bytes = decode(&normalized)?;
        let kind = classify(&bytes);
        tracing::debug!(len = bytes.len(), kind = kind.label(), "decoded payload");
        let format = kind.format().ok_or(ConvertError::UnsupportedFormat)?;
        Ok(Self { format, bytes })
    }

    /// Default destination inside `dir`.
    pub fn default_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.format.default_file_name())
    }

    /// Turns what the user typed into the final destination: relative paths
    /// resolve against `cwd` and a missing extension gets the format's one.
    pub fn resolve_path(&self, entered: &str, cwd: &Path) -> Option<PathBuf> {
        let entered = entered.trim();
        if entered.is_empty() {
            return None;
        }
        let mut path = PathBuf::from(entered);
        if path.is_relative() {
            path = cwd.join(path);
        }
        if path.extension().is_none() {
            path.set_extension(self.format.extension());
        }
        Some(path)
    }

    /// Writes the bytes to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<(), ConvertError> {
        write_payload(path, &self.bytes)
    }
}

pub fn write_payload(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    std::fs::write(path, bytes).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap::{wrap_text, CellMetrics, GlyphTable};

    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAAAAAA6fptVAAAACklEQVR4nGNgAAAAAgABSK+kcQAAAABJRU5ErkJggg==";
    const PDF_B64: &str = "JVBERi0xLjQKJUVPRgo=";

    #[test]
    fn normalize_strips_breaks_and_whitespace() {
        assert_eq!(normalize("  aGVs\nbG8=\r\n ").unwrap(), "aGVsbG8=");
    }

    #[test]
    fn normalize_rejects_blank_input() {
        assert!(matches!(normalize(""), Err(ConvertError::EmptyInput)));
        assert!(matches!(normalize(" \n\r\n\t "), Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn decode_hello() {
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn decode_rejects_bad_alphabet_and_padding() {
        assert!(matches!(decode("aGVs*G8="), Err(ConvertError::Decode(_))));
        assert!(matches!(decode("aGVsbG8"), Err(ConvertError::Decode(_))));
    }

    #[test]
    fn classify_by_signature() {
        assert_eq!(classify(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), FileKind::Png);
        assert_eq!(classify(b"%PDF-1.7\n"), FileKind::Pdf);
        assert_eq!(classify(b"hello"), FileKind::Unrecognized);
        assert_eq!(classify(b""), FileKind::Unrecognized);
        // Truncated signatures do not count
        assert_eq!(classify(b"\x89PNG\r\n"), FileKind::Unrecognized);
        assert_eq!(classify(b"%PDF"), FileKind::Unrecognized);
    }

    #[test]
    fn only_png_and_pdf_are_savable() {
        assert_eq!(FileKind::Png.format(), Some(Format::Png));
        assert_eq!(FileKind::Pdf.format(), Some(Format::Pdf));
        assert_eq!(FileKind::Unrecognized.format(), None);
        assert_eq!(FileKind::Unrecognized.label(), "unknown");
    }

    #[test]
    fn hello_is_unsupported() {
        assert!(matches!(
            Payload::from_text("aGVsbG8="),
            Err(ConvertError::UnsupportedFormat)
        ));
    }

    #[test]
    fn png_payload_defaults_to_base64_png() {
        let payload = Payload::from_text(PNG_B64).unwrap();
        assert_eq!(payload.format, Format::Png);
        assert_eq!(payload.default_path(Path::new("/out")), PathBuf::from("/out/base64.png"));
        assert_eq!(payload.format.filter_label(), "PNG Files (*.png)");
    }

    #[test]
    fn pdf_payload_defaults_to_base64_pdf() {
        let payload = Payload::from_text(PDF_B64).unwrap();
        assert_eq!(payload.format, Format::Pdf);
        assert_eq!(payload.format.default_file_name(), "base64.pdf");
    }

    #[test]
    fn wrapped_text_decodes_like_original() {
        let table = GlyphTable::base64(CellMetrics);
        for budget in [1, 5, 13, 80] {
            let wrapped = wrap_text(PNG_B64, budget, &table);
            let payload = Payload::from_text(&wrapped).unwrap();
            assert_eq!(payload.bytes, decode(PNG_B64).unwrap());
        }
    }

    #[test]
    fn resolve_path_appends_extension_and_anchors_relative() {
        let payload = Payload::from_text(PDF_B64).unwrap();
        let cwd = Path::new("/work");
        assert_eq!(payload.resolve_path("report", cwd), Some(PathBuf::from("/work/report.pdf")));
        assert_eq!(payload.resolve_path("/tmp/a.bin", cwd), Some(PathBuf::from("/tmp/a.bin")));
        assert_eq!(payload.resolve_path("   ", cwd), None);
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.pdf");
        std::fs::write(&path, b"old contents that are longer").unwrap();
        let payload = Payload::from_text(PDF_B64).unwrap();
        payload.write_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), payload.bytes);
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = write_payload(&path, b"x").unwrap_err();
        match &err {
            ConvertError::Io { path: p, .. } => assert_eq!(p, &path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("out.png"));
    }
}
