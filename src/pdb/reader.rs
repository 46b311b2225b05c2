//! Bounds-checked little-endian reads over a PDB image
//!
//! Every read is total: a span that does not fit in the buffer yields `0`
//! or an empty string instead of an error, so truncated files decode to
//! partial results.

/// Immutable view over the raw bytes of a PDB file
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes at `offset`, or `None` if the span leaves the buffer
    pub fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.slice(offset, N)?.try_into().ok()
    }

    pub fn u8(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    pub fn u16(&self, offset: usize) -> u16 {
        self.array::<2>(offset).map(u16::from_le_bytes).unwrap_or(0)
    }

    pub fn u32(&self, offset: usize) -> u32 {
        self.array::<4>(offset).map(u32::from_le_bytes).unwrap_or(0)
    }

    /// Decode `len` bytes at `offset` as ASCII
    ///
    /// Returns an empty string if the span is out of bounds or contains a
    /// byte above 0x7f.
    pub fn ascii(&self, offset: usize, len: usize) -> String {
        match self.slice(offset, len) {
            Some(bytes) if bytes.is_ascii() => bytes.iter().map(|&b| b as char).collect(),
            _ => String::new(),
        }
    }

    /// Decode `len` bytes at `offset` as UTF-16LE
    ///
    /// Returns an empty string if the span is out of bounds, has an odd
    /// length, or contains an unpaired surrogate.
    pub fn utf16le(&self, offset: usize, len: usize) -> String {
        let Some(bytes) = self.slice(offset, len) else {
            return String::new();
        };
        if bytes.len() % 2 != 0 {
            return String::new();
        }

        let units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let reader = ByteReader::new(&data);

        assert_eq!(reader.u8(0), 0x01);
        assert_eq!(reader.u16(0), 0x0201);
        assert_eq!(reader.u32(1), 0x0504_0302);
    }

    #[test]
    fn test_reads_past_end_return_zero() {
        let data = [0xff; 4];
        let reader = ByteReader::new(&data);

        assert_eq!(reader.u8(4), 0);
        assert_eq!(reader.u16(3), 0);
        assert_eq!(reader.u32(1), 0);
        assert_eq!(reader.u32(usize::MAX), 0);
        assert_eq!(reader.u32(0), 0xffff_ffff);
    }

    #[test]
    fn test_truncated_buffers_never_read_partial_values() {
        let full = [0x11u8, 0x22, 0x33, 0x44];
        for len in 0..full.len() {
            let reader = ByteReader::new(&full[..len]);
            assert_eq!(reader.u32(0), 0, "len {}", len);
            if len < 2 {
                assert_eq!(reader.u16(0), 0, "len {}", len);
            } else {
                assert_eq!(reader.u16(0), 0x2211);
            }
        }
    }

    #[test]
    fn test_ascii_decoding() {
        let data = b"xHello";
        let reader = ByteReader::new(data);

        assert_eq!(reader.ascii(1, 5), "Hello");
        assert_eq!(reader.ascii(1, 6), "");
        assert_eq!(reader.ascii(0, 0), "");
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        let data = [b'a', 0xe9, b'b'];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.ascii(0, 3), "");
        assert_eq!(reader.ascii(0, 1), "a");
    }

    #[test]
    fn test_utf16le_decoding() {
        let data: Vec<u8> = "Déjà".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        let reader = ByteReader::new(&data);

        assert_eq!(reader.utf16le(0, data.len()), "Déjà");
        assert_eq!(reader.utf16le(0, data.len() - 1), "");
        assert_eq!(reader.utf16le(2, data.len()), "");
    }

    #[test]
    fn test_utf16le_rejects_unpaired_surrogate() {
        let data = 0xd800u16.to_le_bytes();
        let reader = ByteReader::new(&data);
        assert_eq!(reader.utf16le(0, 2), "");
    }
}
