// Dictionary file header.
//
// Layout (big endian):
// - bytes 0..4: magic number
// - bytes 4..6: format version
// - bytes 6..8: option flags
// - bytes 8..12: total header size, including this prefix
// - then key/value attribute pairs, each a code point run closed by the
//   terminator, up to the header size
//
// The trie body starts right after the header.

use bytemuck::{Pod, Zeroable};
use hashbrown::HashMap;

use crate::FormatError;
use crate::codec;

/// Magic number of dictionaries with an attribute header.
pub const MAGIC_NUMBER: u32 = 0x9BC1_3AFE;

/// Size of the fixed header prefix in bytes.
pub const HEADER_PREFIX_SIZE: usize = 12;

/// Format versions this crate can walk.
pub const SUPPORTED_VERSIONS: [u16; 2] = [3, 4];

/// Fixed header prefix as stored on disk.
///
/// Every field is a byte array, so the struct has alignment 1 and can be
/// cast from any offset.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeaderPrefix {
    magic: [u8; 4],
    version: [u8; 2],
    flags: [u8; 2],
    header_size: [u8; 4],
}

const _: () = assert!(size_of::<RawHeaderPrefix>() == HEADER_PREFIX_SIZE);

/// Parsed dictionary header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryHeader {
    pub version: u16,
    pub flags: u16,
    /// Total header size; the trie body starts at this offset.
    pub size: usize,
    pub attributes: HashMap<String, String>,
}

impl DictionaryHeader {
    /// Parse and validate the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < HEADER_PREFIX_SIZE {
            return Err(FormatError::TooShort {
                expected: HEADER_PREFIX_SIZE,
                actual: data.len(),
            });
        }
        let prefix: &RawHeaderPrefix = bytemuck::from_bytes(&data[..HEADER_PREFIX_SIZE]);

        if u32::from_be_bytes(prefix.magic) != MAGIC_NUMBER {
            return Err(FormatError::InvalidMagic);
        }
        let version = u16::from_be_bytes(prefix.version);
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(FormatError::UnsupportedVersion(version));
        }
        let flags = u16::from_be_bytes(prefix.flags);
        let size = u32::from_be_bytes(prefix.header_size) as usize;
        if size < HEADER_PREFIX_SIZE || size > data.len() {
            return Err(FormatError::TooShort {
                expected: size.max(HEADER_PREFIX_SIZE),
                actual: data.len(),
            });
        }

        let attributes = parse_attributes(&data[..size], HEADER_PREFIX_SIZE)?;
        Ok(Self {
            version,
            flags,
            size,
            attributes,
        })
    }

    /// Look up a header attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The trie body of `data`, which must be the buffer this header was parsed from.
    pub fn body<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data.get(self.size..).unwrap_or_default()
    }
}

fn parse_attributes(
    header: &[u8],
    mut pos: usize,
) -> Result<HashMap<String, String>, FormatError> {
    let mut attributes = HashMap::new();
    while pos < header.len() {
        let key = read_string(header, &mut pos)?;
        let value = read_string(header, &mut pos)?;
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn read_string(buf: &[u8], pos: &mut usize) -> Result<String, FormatError> {
    let mut out = String::new();
    while let Some(cp) = codec::read_code_point(buf, pos)? {
        out.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    Ok(out)
}
