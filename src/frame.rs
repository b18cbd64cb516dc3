//! Frame boundary detection and the linear frame scan.
//!
//! # Detection
//! A frame header opens with a 14-bit sync code, but that bit pattern also
//! occurs by accident in compressed audio, frequently.  [`probe_frame_header`]
//! therefore walks the fixed and variable-length header fields to find the
//! header's extent, recomputes the CRC-8 over it, and only reports a
//! boundary when the stored checksum byte matches.  A checksum mismatch is
//! a routine negative result, never an error.  The probe restores the
//! cursor on every exit path.
//!
//! # Scanning
//! [`next_frame_boundary`] is a deliberate brute-force search: step one
//! byte, probe, repeat.  Worst case is O(stream length), but the checksum
//! gate makes the common case a handful of probes between true boundaries.
//! The loop is bounded by the stream length so corrupt or truncated input
//! surfaces as [`ScanError::EndOfStream`] instead of spinning.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::crc::crc8;
use crate::metadata::{self, MetadataProbe};
use crate::stream::{stream_len, with_restored_position, ScanError};
use crate::utf8::skip_coded_number;

/// 14-bit sync code opening every frame header.
pub const FRAME_SYNC_CODE: u16 = 0b11_1111_1111_1110;

/// Header re-reads at or below this size use a stack buffer.  A well-formed
/// header is 5–11 bytes; only pathological continuation-byte runs exceed
/// the threshold and fall back to the heap.
const STACK_BUF_LEN: usize = 16;

/// Outcome of probing one offset for a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameProbe {
    /// A checksum-valid frame header begins at the probed offset.
    Boundary {
        /// Blocking-strategy bit from the sync word (false = fixed block
        /// size, true = variable).  Recorded, not validated.
        variable_block_size: bool,
    },
    /// No sync code at this offset, or the header checksum did not hold.
    NotBoundary,
}

impl FrameProbe {
    pub fn is_boundary(self) -> bool {
        matches!(self, FrameProbe::Boundary { .. })
    }
}

/// Probes the current offset for a checksum-valid frame header.
///
/// Non-mutating: the cursor is back at the probed offset when this returns,
/// on the success, failure, and error paths alike.  Running off the end of
/// the stream mid-probe is an ordinary [`FrameProbe::NotBoundary`].
pub fn probe_frame_header<R: Read + Seek>(reader: &mut R) -> io::Result<FrameProbe> {
    with_restored_position(reader, |r| match probe_inner(r) {
        Ok(probe) => Ok(probe),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(FrameProbe::NotBoundary),
        Err(e) => Err(e),
    })
}

fn probe_inner<R: Read + Seek>(r: &mut R) -> io::Result<FrameProbe> {
    let start = r.stream_position()?;

    // Sync code <14>, reserved <1>, blocking strategy <1>.
    let sync_word = r.read_u16::<BigEndian>()?;
    if sync_word >> 2 != FRAME_SYNC_CODE {
        return Ok(FrameProbe::NotBoundary);
    }
    let variable_block_size = sync_word & 1 == 1;

    // Block size, sample rate, channel assignment, sample size: two bytes
    // boundary detection never needs to interpret.
    r.seek(SeekFrom::Current(2))?;

    // Frame/sample number, variable length.
    skip_coded_number(r)?;

    // Everything consumed so far is covered by the header CRC-8.  The
    // fields were read piecemeal, so rewind and re-read the header whole.
    let header_len = (r.stream_position()? - start) as usize;
    let mut stack_buf = [0u8; STACK_BUF_LEN];
    let mut heap_buf;
    let header: &mut [u8] = if header_len <= STACK_BUF_LEN {
        &mut stack_buf[..header_len]
    } else {
        heap_buf = vec![0u8; header_len];
        &mut heap_buf
    };
    r.seek(SeekFrom::Start(start))?;
    r.read_exact(header)?;

    let stored = r.read_u8()?;
    if crc8(header) != stored {
        return Ok(FrameProbe::NotBoundary);
    }

    Ok(FrameProbe::Boundary {
        variable_block_size,
    })
}

/// Non-mutating predicate: does a checksum-valid frame header begin at the
/// current offset?  Idempotent; the cursor is left where it was.
pub fn is_frame_boundary<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    Ok(probe_frame_header(reader)?.is_boundary())
}

/// Advances from a known boundary to the next one and returns its offset.
///
/// Steps one byte at a time, probing each offset; the cursor is left ON the
/// found boundary.  This is the one boundary-finding call whose net effect
/// is cursor movement.  Exhausting the stream without a match is fatal.
pub fn next_frame_boundary<R: Read + Seek>(reader: &mut R) -> Result<u64, ScanError> {
    let len = stream_len(reader)?;
    let mut pos = reader.stream_position()? + 1;

    while pos < len {
        reader.seek(SeekFrom::Start(pos))?;
        if probe_frame_header(reader)?.is_boundary() {
            return Ok(pos);
        }
        pos += 1;
    }
    Err(ScanError::EndOfStream)
}

/// Validates the stream marker, drains the metadata area, and leaves the
/// cursor on the first byte of frame data.  Returns that offset.
///
/// The offset is where the first frame header should begin; callers that
/// want certainty can confirm with [`is_frame_boundary`].
pub fn seek_to_first_frame<R: Read + Seek>(reader: &mut R) -> Result<u64, ScanError> {
    metadata::seek_to_metadata(reader)?;
    while let MetadataProbe::Header(_) = metadata::next_metadata_header(reader)? {}
    Ok(reader.stream_position()?)
}
