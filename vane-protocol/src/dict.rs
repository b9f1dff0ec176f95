//! Dictionary encoding and decoding for the companion link.
//!
//! Dictionary format (all integers little endian):
//! - COUNT (1 byte): number of tuples that follow
//! - per tuple:
//!   - KEY (4 bytes): application key
//!   - TYPE (1 byte): value type tag, see [`TupleType`]
//!   - LENGTH (2 bytes): value length in bytes
//!   - VALUE (LENGTH bytes): type-specific data

use heapless::Vec;

/// Size of the dictionary header (tuple count)
pub const DICT_HEADER_SIZE: usize = 1;

/// Size of a tuple header (KEY + TYPE + LENGTH)
pub const TUPLE_HEADER_SIZE: usize = 4 + 1 + 2;

/// Errors that can occur during dictionary parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// No header byte present
    Empty,
    /// A tuple header or value runs past the end of the data
    Truncated,
    /// Type tag is not one of the known tuple types
    UnknownType(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
    /// More than 255 tuples written
    TooManyTuples,
    /// Value longer than a tuple length field can describe
    ValueTooLarge,
}

/// Tuple value type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleType {
    /// Raw bytes
    ByteArray,
    /// NUL-terminated text
    CString,
    /// Unsigned integer (1, 2 or 4 bytes)
    Uint,
    /// Signed integer (1, 2 or 4 bytes)
    Int,
}

// Wire format values
const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

impl TupleType {
    /// Parse a type tag from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TYPE_BYTE_ARRAY => Some(TupleType::ByteArray),
            TYPE_CSTRING => Some(TupleType::CString),
            TYPE_UINT => Some(TupleType::Uint),
            TYPE_INT => Some(TupleType::Int),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub const fn to_byte(self) -> u8 {
        match self {
            TupleType::ByteArray => TYPE_BYTE_ARRAY,
            TupleType::CString => TYPE_CSTRING,
            TupleType::Uint => TYPE_UINT,
            TupleType::Int => TYPE_INT,
        }
    }
}

/// A single key/value entry borrowed from an encoded dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple<'a> {
    /// Application key
    pub key: u32,
    /// Value type tag
    pub tuple_type: TupleType,
    /// Raw value bytes (LENGTH bytes, including any NUL terminator)
    pub value: &'a [u8],
}

impl<'a> Tuple<'a> {
    /// Interpret the value as a signed 32-bit integer
    ///
    /// Integers may be 1, 2 or 4 bytes wide. Signed values are sign-extended;
    /// unsigned values must fit in `i32`. Returns `None` for any other type
    /// or width.
    pub fn as_i32(&self) -> Option<i32> {
        match (self.tuple_type, self.value) {
            (TupleType::Int, &[b0]) => Some(i8::from_le_bytes([b0]) as i32),
            (TupleType::Int, &[b0, b1]) => Some(i16::from_le_bytes([b0, b1]) as i32),
            (TupleType::Int, &[b0, b1, b2, b3]) => Some(i32::from_le_bytes([b0, b1, b2, b3])),
            (TupleType::Uint, &[b0]) => Some(b0 as i32),
            (TupleType::Uint, &[b0, b1]) => Some(u16::from_le_bytes([b0, b1]) as i32),
            (TupleType::Uint, &[b0, b1, b2, b3]) => {
                i32::try_from(u32::from_le_bytes([b0, b1, b2, b3])).ok()
            }
            _ => None,
        }
    }

    /// Interpret the value as NUL-terminated text
    ///
    /// Returns the bytes before the first NUL (or the whole value if the
    /// sender omitted the terminator). Returns `None` for non-text tuples.
    pub fn as_cstr(&self) -> Option<&'a [u8]> {
        if self.tuple_type != TupleType::CString {
            return None;
        }
        let end = self
            .value
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.value.len());
        Some(&self.value[..end])
    }
}

/// Iterator over the tuples of an encoded dictionary
///
/// Yields tuples in wire order. A structural error is yielded once and ends
/// the iteration, since tuple boundaries cannot be recovered after it.
/// Bytes after the last counted tuple are ignored.
#[derive(Debug, Clone)]
pub struct DictReader<'a> {
    data: &'a [u8],
    offset: usize,
    remaining: u8,
}

impl<'a> DictReader<'a> {
    /// Create a reader over an encoded dictionary
    pub fn new(data: &'a [u8]) -> Result<Self, DictError> {
        let (&count, _) = data.split_first().ok_or(DictError::Empty)?;
        Ok(Self {
            data,
            offset: DICT_HEADER_SIZE,
            remaining: count,
        })
    }

    /// Number of tuples not yet read
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    fn read_tuple(&mut self) -> Result<Tuple<'a>, DictError> {
        let header = self
            .data
            .get(self.offset..self.offset + TUPLE_HEADER_SIZE)
            .ok_or(DictError::Truncated)?;

        let key = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let tuple_type = TupleType::from_byte(header[4]).ok_or(DictError::UnknownType(header[4]))?;
        let length = u16::from_le_bytes([header[5], header[6]]) as usize;

        let start = self.offset + TUPLE_HEADER_SIZE;
        let value = self
            .data
            .get(start..start + length)
            .ok_or(DictError::Truncated)?;

        self.offset = start + length;
        Ok(Tuple {
            key,
            tuple_type,
            value,
        })
    }
}

impl<'a> Iterator for DictReader<'a> {
    type Item = Result<Tuple<'a>, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.read_tuple() {
            Ok(tuple) => {
                self.remaining -= 1;
                Some(Ok(tuple))
            }
            Err(e) => {
                // Tuple boundaries are lost; stop here
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}

/// Builder for an encoded dictionary of at most `N` bytes
#[derive(Debug, Clone)]
pub struct DictWriter<const N: usize> {
    buffer: Vec<u8, N>,
    count: u8,
}

impl<const N: usize> DictWriter<N> {
    /// Create an empty dictionary
    pub fn new() -> Result<Self, DictError> {
        let mut buffer = Vec::new();
        buffer.push(0).map_err(|_| DictError::BufferTooSmall)?;
        Ok(Self { buffer, count: 0 })
    }

    /// Append a one-byte unsigned integer
    pub fn write_uint8(&mut self, key: u32, value: u8) -> Result<(), DictError> {
        self.write_tuple(key, TupleType::Uint, &[value])
    }

    /// Append a four-byte signed integer
    pub fn write_int32(&mut self, key: u32, value: i32) -> Result<(), DictError> {
        self.write_tuple(key, TupleType::Int, &value.to_le_bytes())
    }

    /// Append text with a trailing NUL
    pub fn write_cstring(&mut self, key: u32, text: &str) -> Result<(), DictError> {
        let length = text.len() + 1;
        let length = u16::try_from(length).map_err(|_| DictError::ValueTooLarge)?;
        self.write_header(key, TupleType::CString, length)?;
        self.extend(text.as_bytes())?;
        self.extend(&[0])
    }

    /// Append a tuple with an explicit type tag
    pub fn write_tuple(
        &mut self,
        key: u32,
        tuple_type: TupleType,
        value: &[u8],
    ) -> Result<(), DictError> {
        let length = u16::try_from(value.len()).map_err(|_| DictError::ValueTooLarge)?;
        self.write_header(key, tuple_type, length)?;
        self.extend(value)
    }

    /// Number of tuples written so far
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Finish the dictionary and return the encoded bytes
    pub fn finish(self) -> Vec<u8, N> {
        self.buffer
    }

    fn write_header(&mut self, key: u32, tuple_type: TupleType, length: u16) -> Result<(), DictError> {
        let count = self.count.checked_add(1).ok_or(DictError::TooManyTuples)?;
        if self.buffer.len() + TUPLE_HEADER_SIZE + length as usize > N {
            return Err(DictError::BufferTooSmall);
        }

        self.extend(&key.to_le_bytes())?;
        self.extend(&[tuple_type.to_byte()])?;
        self.extend(&length.to_le_bytes())?;

        self.count = count;
        self.buffer[0] = count;
        Ok(())
    }

    fn extend(&mut self, bytes: &[u8]) -> Result<(), DictError> {
        self.buffer
            .extend_from_slice(bytes)
            .map_err(|_| DictError::BufferTooSmall)
    }
}
