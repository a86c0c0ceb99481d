//! Byte-to-character decoding for the byte-stream and file overloads.
//!
//! Encoding detection is a collaborator, not a core concern: the reader
//! calls an [`EncodingSniffer`] to turn raw bytes into a character stream
//! and never inspects bytes itself. [`XmlDeclSniffer`] is the default:
//! XML-style sniffing that honors a byte-order mark, then an explicit
//! `encoding` declaration in a leading processing instruction, and falls
//! back to UTF-8.

use std::io;

/// Decodes an input byte stream into characters.
pub trait EncodingSniffer: Send + Sync {
    /// Decode `bytes` completely. Failures are I/O-class: the stream could
    /// not be decoded, nothing was parsed yet.
    fn decode(&self, bytes: &[u8]) -> io::Result<String>;
}

/// Default sniffer: BOM, then declared encoding, then UTF-8.
///
/// UTF-8 and UTF-16 (with BOM) decode directly. A declared encoding other
/// than the UTF-8/ASCII family is refused - callers with exotic encodings
/// supply their own sniffer.
#[derive(Debug, Default)]
pub struct XmlDeclSniffer;

impl EncodingSniffer for XmlDeclSniffer {
    fn decode(&self, bytes: &[u8]) -> io::Result<String> {
        if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
            return utf8(rest);
        }
        if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
            return utf16(rest, u16::from_le_bytes);
        }
        if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
            return utf16(rest, u16::from_be_bytes);
        }
        if let Some(declared) = declared_encoding(bytes) {
            let name = declared.to_ascii_lowercase();
            if !matches!(name.as_str(), "utf-8" | "utf8" | "us-ascii" | "ascii") {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported declared encoding '{declared}'"),
                ));
            }
        }
        utf8(bytes)
    }
}

fn utf8(bytes: &[u8]) -> io::Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn utf16(bytes: &[u8], decode: fn([u8; 2]) -> u16) -> io::Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "truncated UTF-16 stream",
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| decode([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Extract the `encoding` value from a leading `<?xml ...?>` declaration,
/// reading only the ASCII prefix of the stream.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head: String = bytes
        .iter()
        .take(128)
        .take_while(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();
    let rest = head.strip_prefix("<?xml")?;
    let declaration = &rest[..rest.find("?>")?];
    let after_key = declaration.split_once("encoding")?.1.trim_start();
    let after_eq = after_key.strip_prefix('=')?.trim_start();
    let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after_eq[1..];
    Some(value[..value.find(quote)?].to_owned())
}
