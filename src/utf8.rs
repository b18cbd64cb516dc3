//! Skipping the UTF-8-style coded number in a frame header.
//!
//! FLAC stores the frame/sample number as a UTF-8-style variable-length
//! integer of 1–7 bytes.  Boundary detection only needs to know where the
//! field ends, never what it holds, so this module advances the cursor past
//! the encoding without decoding a value.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::ReadBytesExt;
use log::debug;

/// Advances `reader` exactly past one coded number and returns the number
/// of bytes consumed.
///
/// - Lead byte `0xxxxxxx`: single-byte value, one byte consumed.
/// - Lead byte `11xxxxxx`: multi-byte sequence; every following `10xxxxxx`
///   continuation byte belongs to it.  The first non-continuation byte does
///   not, so the cursor is rewound one byte before returning.
/// - Lead byte `10xxxxxx`: a bare continuation byte where a lead byte was
///   expected.  Malformed, but treated as an empty value: the one byte read
///   stays consumed and scanning continues.
///
/// Hitting end-of-stream while consuming continuation bytes ends the skip
/// at the end of the stream.
pub fn skip_coded_number<R: Read + Seek>(reader: &mut R) -> io::Result<u64> {
    let start = reader.stream_position()?;
    let lead = reader.read_u8()?;

    if lead >> 7 == 0b0 {
        return Ok(1);
    }

    if lead >> 6 == 0b11 {
        loop {
            let byte = match reader.read_u8() {
                Ok(byte) => byte,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            };
            if byte >> 6 != 0b10 {
                // One past the last continuation byte; hand it back.
                reader.seek(SeekFrom::Current(-1))?;
                break;
            }
        }
        return Ok(reader.stream_position()? - start);
    }

    debug!("coded number starts with continuation byte {lead:#010b}; treating as empty");
    Ok(1)
}
