//! Metadata block headers and the metadata→frame transition.
//!
//! A FLAC stream opens with the `fLaC` marker, then a run of metadata
//! blocks, then audio frames.  Splitting only needs the frame area, so block
//! payloads are skipped wholesale; only the 4-byte headers are decoded.
//!
//! # Termination
//! The end of the metadata area is detected by probing each header position
//! for the 14-bit frame sync code, NOT by trusting the previous header's
//! last-block flag.  Non-conformant encoders get that flag wrong; the sync
//! probe is authoritative and runs before any field is decoded.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder};

use crate::frame::FRAME_SYNC_CODE;
use crate::stream::ScanError;

/// Stream marker at offset 0.
pub const FLAC_MARKER: &[u8; 4] = b"fLaC";

/// Metadata block type codes (7 bits on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    Unknown(u8),
}

impl BlockType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => BlockType::StreamInfo,
            1 => BlockType::Padding,
            2 => BlockType::Application,
            3 => BlockType::SeekTable,
            4 => BlockType::VorbisComment,
            5 => BlockType::CueSheet,
            6 => BlockType::Picture,
            other => BlockType::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            BlockType::StreamInfo => 0,
            BlockType::Padding => 1,
            BlockType::Application => 2,
            BlockType::SeekTable => 3,
            BlockType::VorbisComment => 4,
            BlockType::CueSheet => 5,
            BlockType::Picture => 6,
            BlockType::Unknown(other) => other,
        }
    }
}

/// One decoded 4-byte metadata block header.
///
/// Transient: produced while walking the metadata area, never persisted.
/// The block payload itself is seeked over, not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataBlockHeader {
    /// Last-block flag as written by the encoder.  Recorded but not trusted
    /// for termination; see the module docs.
    pub is_last: bool,
    pub block_type: BlockType,
    /// Payload length in bytes (24 bits on the wire).
    pub length: u32,
}

impl MetadataBlockHeader {
    /// Decodes the big-endian 32-bit header word: bit 31 last-block flag,
    /// bits 30–24 block type, bits 23–0 payload length.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let word = BigEndian::read_u32(&bytes);
        Self {
            is_last: word >> 31 == 1,
            block_type: BlockType::from_code(((word >> 24) & 0x7F) as u8),
            length: word & 0x00FF_FFFF,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let word = (u32::from(self.is_last) << 31)
            | (u32::from(self.block_type.code() & 0x7F) << 24)
            | (self.length & 0x00FF_FFFF);
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, word);
        buf
    }
}

/// Result of probing the stream for the next metadata header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataProbe {
    Header(MetadataBlockHeader),
    /// The frame sync code showed up where a header would be: the metadata
    /// area is over and the cursor sits on the first frame byte.
    EndOfMetadata,
}

/// Checks whether the stream starts with the `fLaC` marker.
///
/// Rewinds to offset 0 first.  A stream shorter than the marker is simply
/// not FLAC, so that reads as `false` rather than an error.
pub fn has_flac_marker<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    reader.seek(SeekFrom::Start(0))?;
    let mut marker = [0u8; 4];
    match reader.read_exact(&mut marker) {
        Ok(()) => Ok(&marker == FLAC_MARKER),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validates the stream marker and positions the cursor at the first
/// metadata header (offset 4).
pub fn seek_to_metadata<R: Read + Seek>(reader: &mut R) -> Result<(), ScanError> {
    if !has_flac_marker(reader)? {
        return Err(ScanError::MissingMarker);
    }
    reader.seek(SeekFrom::Start(FLAC_MARKER.len() as u64))?;
    Ok(())
}

/// Reads the next metadata block header and seeks past its payload.
///
/// The four candidate bytes are checked for the frame sync code before any
/// field is decoded; on a hit they are handed back (cursor rewound by 4)
/// and [`MetadataProbe::EndOfMetadata`] is returned, whatever the previous
/// header's `is_last` flag said.  Running out of bytes at the peek is also
/// treated as end of metadata.
///
/// Callers iterate until `EndOfMetadata`.
pub fn next_metadata_header<R: Read + Seek>(reader: &mut R) -> Result<MetadataProbe, ScanError> {
    let start = reader.stream_position()?;

    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            reader.seek(SeekFrom::Start(start))?;
            return Ok(MetadataProbe::EndOfMetadata);
        }
        Err(e) => return Err(e.into()),
    }

    // Sync code in the top 14 bits means we have overrun into frame data.
    if (BigEndian::read_u32(&buf) >> 18) as u16 == FRAME_SYNC_CODE {
        reader.seek(SeekFrom::Start(start))?;
        return Ok(MetadataProbe::EndOfMetadata);
    }

    let header = MetadataBlockHeader::from_bytes(buf);
    reader.seek(SeekFrom::Current(i64::from(header.length)))?;
    Ok(MetadataProbe::Header(header))
}
