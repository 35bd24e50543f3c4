// Byte-order-mark detection and decoding of delimited text

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Text encoding of a delimited file, decided by its byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// No BOM. Decoded as UTF-8.
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl TextEncoding {
    /// Inspect up to the first 4 bytes of a file.
    ///
    /// UTF-32 LE is checked before UTF-16 LE since its BOM (`FF FE 00 00`)
    /// starts with the UTF-16 LE one.
    pub fn from_bom(head: &[u8]) -> Self {
        match head {
            [0xFF, 0xFE, 0x00, 0x00, ..] => TextEncoding::Utf32Le,
            [0x00, 0x00, 0xFE, 0xFF, ..] => TextEncoding::Utf32Be,
            [0xEF, 0xBB, 0xBF, ..] => TextEncoding::Utf8Bom,
            [0xFE, 0xFF, ..] => TextEncoding::Utf16Be,
            [0xFF, 0xFE, ..] => TextEncoding::Utf16Le,
            _ => TextEncoding::Utf8,
        }
    }

    pub fn bom_len(self) -> usize {
        match self {
            TextEncoding::Utf8 => 0,
            TextEncoding::Utf8Bom => 3,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
            TextEncoding::Utf32Le | TextEncoding::Utf32Be => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf8Bom => "UTF-8 (BOM)",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Utf32Le => "UTF-32LE",
            TextEncoding::Utf32Be => "UTF-32BE",
        }
    }

    /// Decode a whole file's bytes, BOM included. Never fails: malformed
    /// sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        let body = bytes.get(self.bom_len()..).unwrap_or_default();
        let encoding = match self {
            TextEncoding::Utf8 | TextEncoding::Utf8Bom => encoding_rs::UTF_8,
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
            TextEncoding::Utf32Le => return decode_utf32(body, u32::from_le_bytes),
            TextEncoding::Utf32Be => return decode_utf32(body, u32::from_be_bytes),
        };
        let (decoded, had_errors) = encoding.decode_without_bom_handling(body);
        if had_errors {
            log::debug!("{}: replaced invalid byte sequences with U+FFFD", self.name());
        }
        decoded.into_owned()
    }
}

/// Detect the encoding of the file at `path` from its first 4 bytes.
///
/// An I/O failure here is not fatal: it is logged and UTF-8 is assumed, so
/// the caller's own read reports the real error if there is one.
pub fn detect_encoding(path: &Path) -> TextEncoding {
    match read_head(path) {
        Ok(head) => TextEncoding::from_bom(&head),
        Err(e) => {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            log::warn!("could not detect encoding for '{name}', using UTF-8: {e}");
            TextEncoding::Utf8
        }
    }
}

fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let mut head = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut head)?;
    Ok(head)
}

fn decode_utf32(body: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let chunks = body.chunks_exact(4);
    let trailing = !chunks.remainder().is_empty();
    let mut out = String::with_capacity(body.len() / 4);
    for chunk in chunks {
        let code = unit([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    if trailing {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    out
}
