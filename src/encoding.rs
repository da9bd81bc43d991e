//! Binary Canonical Serialization (BCS) for the handful of types that end up
//! inside a signed transaction.
//!
//! Integers are little-endian, sequence lengths and enum variant indices are
//! ULEB128, fixed-size arrays carry no length prefix.
use std::io::{self, Write};

/// Trait for objects that have a canonical binary representation for Hashing/Signing.
/// careful: This must be deterministic across platforms/versions.
pub trait CanonicalSerialize {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        self.canonical_serialize(&mut buf).expect("memory write failed");
        buf
    }
}

/// Write `value` as ULEB128: 7 bits per byte, high bit set on all but the last.
pub fn write_uleb128<W: Write>(writer: &mut W, mut value: u64) -> io::Result<()> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            return writer.write_all(&[byte]);
        }
        writer.write_all(&[byte | 0x80])?;
    }
}

/// Length prefix for a sequence. BCS caps sequence lengths at u32::MAX.
pub fn write_length<W: Write>(writer: &mut W, len: usize) -> io::Result<()> {
    if len > u32::MAX as usize {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "sequence too long"));
    }
    write_uleb128(writer, len as u64)
}

// --- Primitives ---

impl CanonicalSerialize for u8 {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[*self])
    }
}

impl CanonicalSerialize for u64 {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl CanonicalSerialize for String {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let bytes = self.as_bytes();
        write_length(writer, bytes.len())?;
        writer.write_all(bytes)
    }
}

impl<T: CanonicalSerialize> CanonicalSerialize for Vec<T> {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_length(writer, self.len())?;
        for item in self {
            item.canonical_serialize(writer)?;
        }
        Ok(())
    }
}
