//! DeviceSQL string decoding
//!
//! Three variants, keyed by the first byte:
//! - Short ASCII: header = ((len + 1) << 1) | 1, then content bytes (max 126 chars)
//! - Long ASCII: flags (0x40), length u16 (content_len + 4), padding (0x00), then content
//! - Long UTF-16LE: flags (0x90), length u16 (byte_len + 4), padding (0x00), then content

use super::reader::ByteReader;
use super::types::string_flags;

/// Size of the long-form header (flags + u16 length + padding)
const LONG_HEADER_LEN: usize = 4;

impl ByteReader<'_> {
    /// Decode the DeviceSQL string starting at `offset`
    ///
    /// Any malformed or out-of-range string decodes to an empty string.
    pub fn read_string(&self, offset: usize) -> String {
        if offset >= self.len() {
            return String::new();
        }

        match self.u8(offset) {
            string_flags::LONG_ASCII => {
                let length = self.u16(offset + 1) as usize;
                if length < LONG_HEADER_LEN {
                    return String::new();
                }
                self.ascii(offset + LONG_HEADER_LEN, length - LONG_HEADER_LEN)
            }
            string_flags::LONG_UTF16LE => {
                let length = self.u16(offset + 1) as usize;
                if length < LONG_HEADER_LEN {
                    return String::new();
                }
                self.utf16le(offset + LONG_HEADER_LEN, length - LONG_HEADER_LEN)
            }
            header if header & string_flags::SHORT_ASCII != 0 => {
                let length = (header >> 1) as usize;
                if length < 1 {
                    return String::new();
                }
                self.ascii(offset + 1, length - 1)
            }
            _ => String::new(),
        }
    }
}

/// DeviceSQL bytes for `s`, used to build rows in tests
///
/// Short form for ASCII up to 126 bytes, long ASCII beyond that, UTF-16LE
/// for anything non-ASCII.
#[cfg(test)]
pub(crate) fn encode_device_sql(s: &str) -> Vec<u8> {
    if s.is_ascii() && s.len() <= 126 {
        let mut out = vec![(((s.len() + 1) << 1) as u8) | string_flags::SHORT_ASCII];
        out.extend_from_slice(s.as_bytes());
        return out;
    }

    let (flag, payload): (u8, Vec<u8>) = if s.is_ascii() {
        (string_flags::LONG_ASCII, s.as_bytes().to_vec())
    } else {
        let units = s.encode_utf16().flat_map(u16::to_le_bytes).collect();
        (string_flags::LONG_UTF16LE, units)
    };
    let mut out = vec![flag];
    out.extend_from_slice(&((payload.len() + LONG_HEADER_LEN) as u16).to_le_bytes());
    out.push(0);
    out.extend(payload);
    out
}
