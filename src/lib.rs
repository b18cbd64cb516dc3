//! flacframe — frame boundary detection for FLAC streams.
//!
//! Locates the byte offsets where audio frames begin without decoding any
//! audio: validate the `fLaC` marker, skip the metadata blocks, then walk
//! the frame area with a checksum-gated sync probe.  Consumers (cue
//! splitting, frame extraction) treat the offsets as opaque byte ranges to
//! copy.
//!
//! ```no_run
//! use std::fs::File;
//! use flacframe::{is_frame_boundary, next_frame_boundary, seek_to_first_frame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stream = File::open("album.flac")?;
//! let first = seek_to_first_frame(&mut stream)?;
//! assert!(is_frame_boundary(&mut stream)?);
//! let second = next_frame_boundary(&mut stream)?;
//! println!("first frame spans {first}..{second}");
//! # Ok(()) }
//! ```

pub mod crc;
pub mod frame;
pub mod metadata;
pub mod stream;
pub mod utf8;

pub use crc::crc8;
pub use frame::{
    is_frame_boundary, next_frame_boundary, probe_frame_header, seek_to_first_frame, FrameProbe,
    FRAME_SYNC_CODE,
};
pub use metadata::{
    has_flac_marker, next_metadata_header, seek_to_metadata, BlockType, MetadataBlockHeader,
    MetadataProbe, FLAC_MARKER,
};
pub use stream::ScanError;
pub use utf8::skip_coded_number;
