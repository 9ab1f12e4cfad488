//! Configuration constants and options for the PNG container and codec.

/// PNG leading magic: `\x89` "PNG" `\r\n\x1a\n`.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Expected trailing bytes: the "IEND" type tag followed by its fixed CRC-32.
pub const PNG_TRAILER: [u8; 8] = [0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82];

/// Critical chunk type registry.
pub const CRITICAL_CHUNKS: [[u8; 4]; 4] = [*b"IHDR", *b"PLTE", *b"IDAT", *b"IEND"];

/// Ancillary chunk type registry.
pub const ANCILLARY_CHUNKS: [[u8; 4]; 17] = [
    *b"bKGD", *b"cHRM", *b"dSIG", *b"eXIF", *b"gAMA", *b"hIST", *b"iCCP", *b"iTXt", *b"pHYs",
    *b"sBIT", *b"sPLT", *b"sRGB", *b"sTER", *b"tEXt", *b"tIME", *b"tRNS", *b"zTXt",
];

/// Chunk types that may legally appear more than once in a stream.
/// Any other known type is treated as singular and duplicates are rejected.
pub const REPEATABLE_CHUNKS: [[u8; 4]; 5] = [*b"IDAT", *b"sPLT", *b"iTXt", *b"tEXt", *b"zTXt"];

/// Byte length of the IHDR payload.
pub const HEADER_PAYLOAD_LEN: usize = 13;

/// Carrier byte slots consumed per message byte (2 bits per slot).
pub const SLOTS_PER_BYTE: usize = 4;

/// Options threaded through parsing calls instead of process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Verify each chunk's stored CRC-32 while splitting the stream.
    /// Off by default; serialization recomputes checksums regardless.
    pub verify_checksums: bool,
}
