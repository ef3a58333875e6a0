//! Text encodings accepted by search and decode operations.
//!
//! Names are matched case-insensitively. Unknown names are rejected with
//! [`ListError::UnknownEncoding`] rather than falling back to UTF-8.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ListError;

/// A named text encoding.
///
/// # Example
///
/// ```
/// use chunklist::Encoding;
///
/// let enc: Encoding = "HEX".parse()?;
/// assert_eq!(enc, Encoding::Hex);
/// assert_eq!(enc.encode("6162")?, b"ab");
/// assert_eq!(enc.decode(b"ab"), "6162");
/// # Ok::<(), chunklist::ListError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8. Invalid sequences decode to U+FFFD.
    #[default]
    Utf8,
    /// 7-bit ASCII. Decoding clears the high bit of every byte.
    Ascii,
    /// ISO-8859-1, also accepted as `binary`.
    Latin1,
    /// Lowercase hexadecimal, two digits per byte.
    Hex,
    /// Standard padded base64.
    Base64,
    /// UTF-16 little-endian, also accepted as `ucs2`.
    Utf16Le,
}

impl Encoding {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Utf16Le => "utf16le",
        }
    }

    /// Converts text to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidText`] when `hex` or `base64` text is
    /// malformed.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, ListError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            // Low byte of each UTF-16 code unit.
            Encoding::Ascii | Encoding::Latin1 => {
                Ok(text.encode_utf16().map(|unit| unit as u8).collect())
            }
            Encoding::Hex => hex::decode(text).map_err(|e| self.invalid(e)),
            Encoding::Base64 => STANDARD.decode(text).map_err(|e| self.invalid(e)),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        }
    }

    /// Converts bytes to text. Never fails; undecodable input is replaced.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Hex => hex::encode(bytes),
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Utf16Le => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }

    fn invalid(&self, e: impl fmt::Display) -> ListError {
        ListError::InvalidText {
            encoding: self.name(),
            reason: e.to_string(),
        }
    }
}

impl FromStr for Encoding {
    type Err = ListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ascii" => Ok(Encoding::Ascii),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Ok(Encoding::Utf16Le),
            _ => Err(ListError::UnknownEncoding { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
