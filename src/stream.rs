//! Stream-cursor plumbing shared by the metadata and frame scanners.
//!
//! Exactly one mutable resource exists in this crate: the cursor of the
//! stream being analysed.  Every probing operation saves and restores it so
//! a failed probe never leaks position state to the caller.

use std::io::{self, Read, Seek, SeekFrom};

use thiserror::Error;

/// Errors that escape to callers.
///
/// Sync and checksum mismatches never appear here: the scanners consume
/// those internally as ordinary negative results, which is what keeps the
/// brute-force frame scan cheap.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no fLaC marker at the start of the stream")]
    MissingMarker,
    #[error("reached the end of the stream without finding a frame boundary")]
    EndOfStream,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs `probe` and restores the cursor to its entry position on every exit
/// path, success or failure.
pub(crate) fn with_restored_position<R, T, F>(reader: &mut R, probe: F) -> io::Result<T>
where
    R: Read + Seek,
    F: FnOnce(&mut R) -> io::Result<T>,
{
    let start = reader.stream_position()?;
    let outcome = probe(reader);
    reader.seek(SeekFrom::Start(start))?;
    outcome
}

/// Total stream length in bytes; leaves the cursor where it was.
pub(crate) fn stream_len<R: Seek>(reader: &mut R) -> io::Result<u64> {
    let pos = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(pos))?;
    Ok(end)
}
