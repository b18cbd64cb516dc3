//! CRC-8 header checksum (polynomial 0x07, MSB-first, initial value 0x00).
//!
//! This is the CCITT-style variant FLAC applies to frame headers: no input
//! or output reflection, no final XOR.  The 14-bit sync code collides with
//! ordinary compressed audio all the time, so this checksum is the
//! authoritative gate for frame boundary detection.

/// Generator polynomial x^8 + x^2 + x + 1.
const POLY: u8 = 0x07;

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC8_TABLE: [u8; 256] = build_table();

/// Computes the CRC-8 of `data`.  An empty slice yields 0x00.
#[inline]
pub fn crc8(data: &[u8]) -> u8 {
    data.iter()
        .fold(0u8, |crc, &byte| CRC8_TABLE[(crc ^ byte) as usize])
}
