//! End-to-end embed/extract behavior over synthesized containers.

use png_stego::config::PNG_MAGIC;
use png_stego::error::{CapacityError, Error};
use png_stego::png::{Chunk, ChunkType, Png};
use png_stego::stego;
use rand::{Rng, RngCore};

/// Fixed 13-byte IHDR payload for a small image with the given color mode.
fn header_payload(color_mode: u8) -> Vec<u8> {
    let mut payload = vec![0u8; 13];
    payload[0..4].copy_from_slice(&16u32.to_be_bytes());
    payload[4..8].copy_from_slice(&16u32.to_be_bytes());
    payload[8] = 8;
    payload[9] = color_mode;
    payload
}

/// Indexed-mode container with a palette of the given size.
fn indexed_png(palette_len: usize) -> Vec<u8> {
    let palette: Vec<u8> = (0..palette_len).map(|i| (i % 256) as u8).collect();
    let mut data = PNG_MAGIC.to_vec();
    data.extend_from_slice(&Chunk::new(ChunkType::IHDR, header_payload(3)).serialize());
    data.extend_from_slice(&Chunk::new(ChunkType::PLTE, palette).serialize());
    data.extend_from_slice(&Chunk::new(ChunkType::IDAT, vec![0x40; 32]).serialize());
    data.extend_from_slice(&Chunk::new(ChunkType::IEND, Vec::new()).serialize());
    data
}

/// Truecolor container with one image data chunk per entry in `idat_sizes`.
fn truecolor_png(idat_sizes: &[usize]) -> Vec<u8> {
    let mut data = PNG_MAGIC.to_vec();
    data.extend_from_slice(&Chunk::new(ChunkType::IHDR, header_payload(2)).serialize());
    for (i, &size) in idat_sizes.iter().enumerate() {
        let payload: Vec<u8> = (0..size).map(|j| ((i + j) % 256) as u8).collect();
        data.extend_from_slice(&Chunk::new(ChunkType::IDAT, payload).serialize());
    }
    data.extend_from_slice(&Chunk::new(ChunkType::IEND, Vec::new()).serialize());
    data
}

#[test]
fn test_round_trip_indexed_palette() {
    // 300-byte palette, message "hi": 2 bytes need 8 slots.
    let mut png = Png::parse(&indexed_png(300)).unwrap();

    stego::embed(&mut png, b"hi").unwrap();

    assert_eq!(stego::extract(&png).unwrap(), b"hi");
}

#[test]
fn test_message_too_large_for_palette() {
    // 76 message bytes need 304 slots, more than the palette holds.
    let mut png = Png::parse(&indexed_png(300)).unwrap();
    let message = vec![b'x'; 76];

    assert!(matches!(
        stego::embed(&mut png, &message),
        Err(Error::Capacity(CapacityError::MessageTooLarge {
            required: 304,
            available: 300,
        }))
    ));
}

#[test]
fn test_exact_capacity_round_trips() {
    // 40 palette bytes hold exactly 10 message bytes.
    let mut png = Png::parse(&indexed_png(40)).unwrap();
    let message: Vec<u8> = (0u8..10).collect();

    stego::embed(&mut png, &message).unwrap();

    assert_eq!(stego::extract(&png).unwrap(), message);
}

#[test]
fn test_one_slot_short_fails() {
    let mut png = Png::parse(&indexed_png(39)).unwrap();
    let message = vec![0u8; 10];

    assert!(matches!(
        stego::embed(&mut png, &message),
        Err(Error::Capacity(CapacityError::MessageTooLarge {
            required: 40,
            available: 39,
        }))
    ));
}

#[test]
fn test_round_trip_spans_multiple_idat_chunks() {
    // 20 message bytes need 80 of the 100 carrier bytes; with stride 1 the
    // slots land in all three data chunks.
    let mut png = Png::parse(&truecolor_png(&[50, 30, 20])).unwrap();
    let message = b"twenty bytes of data";

    stego::embed(&mut png, message).unwrap();

    assert_eq!(stego::extract(&png).unwrap(), message);
}

#[test]
fn test_round_trip_through_serialized_bytes() {
    let mut png = Png::parse(&truecolor_png(&[200])).unwrap();
    let message = b"survives re-serialization";

    stego::embed(&mut png, message).unwrap();
    let stego_bytes = png.serialize();

    let reparsed = Png::parse(&stego_bytes).unwrap();
    assert_eq!(stego::extract(&reparsed).unwrap(), message);
}

#[test]
fn test_binary_message_round_trips() {
    let mut png = Png::parse(&truecolor_png(&[128])).unwrap();
    let message = [0x00, 0xFF, 0x55, 0xAA, 0x01, 0x80];

    stego::embed(&mut png, &message).unwrap();

    assert_eq!(stego::extract(&png).unwrap(), message);
}

#[test]
fn test_grayscale_rejected_by_codec() {
    // A grayscale container parses fine; the codec refuses it.
    let grayscale = {
        let mut data = truecolor_png(&[64]);
        // Rewrite the color mode byte inside the IHDR payload; parse
        // tolerates the now-stale checksum.
        data[PNG_MAGIC.len() + 8 + 9] = 0;
        data
    };

    let mut png = Png::parse(&grayscale).unwrap();
    assert!(matches!(
        stego::embed(&mut png, b"no"),
        Err(Error::UnsupportedColorMode(_))
    ));
    assert!(matches!(
        stego::extract(&png),
        Err(Error::UnsupportedColorMode(_))
    ));
    assert!(stego::capacity(&png).is_err());
}

#[test]
fn test_failed_embed_leaves_container_unmodified() {
    let data = indexed_png(40);
    let mut png = Png::parse(&data).unwrap();

    let oversized = vec![1u8; 11];
    assert!(stego::embed(&mut png, &oversized).is_err());

    assert_eq!(png.serialize(), data);
}

#[test]
fn test_checksums_consistent_after_embed() {
    let mut png = Png::parse(&indexed_png(300)).unwrap();
    stego::embed(&mut png, b"checksum test").unwrap();

    let reparsed = Png::parse(&png.serialize()).unwrap();
    assert!(reparsed.checksum_mismatches().is_empty());
    for chunk in reparsed.chunks() {
        assert!(chunk.verify_checksum());
    }
}

#[test]
fn test_fresh_container_extracts_empty_message() {
    let png = Png::parse(&indexed_png(120)).unwrap();
    assert_eq!(stego::extract(&png).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_empty_message_is_a_no_op_on_payloads() {
    let data = indexed_png(120);
    let mut png = Png::parse(&data).unwrap();

    stego::embed(&mut png, b"").unwrap();

    assert_eq!(png.serialize(), data);
    assert_eq!(stego::extract(&png).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_capacity_matches_carrier_size() {
    let png = Png::parse(&indexed_png(300)).unwrap();
    assert_eq!(stego::capacity(&png).unwrap(), 75);

    let png = Png::parse(&truecolor_png(&[50, 30, 20])).unwrap();
    assert_eq!(stego::capacity(&png).unwrap(), 25);
}

#[test]
fn test_random_messages_round_trip() {
    let mut rng = rand::thread_rng();

    for _ in 0..20 {
        let palette_len = rng.gen_range(64..=1024);
        let mut png = Png::parse(&indexed_png(palette_len)).unwrap();

        let capacity = stego::capacity(&png).unwrap();
        let mut message = vec![0u8; rng.gen_range(0..=capacity)];
        rng.fill_bytes(&mut message);

        stego::embed(&mut png, &message).unwrap();
        let reparsed = Png::parse(&png.serialize()).unwrap();
        assert_eq!(stego::extract(&reparsed).unwrap(), message);
    }
}

#[test]
fn test_file_round_trip() {
    // Exercise the surrounding I/O path: stego bytes written to disk and
    // read back by a separate parse.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stego.png");

    let mut png = Png::parse(&indexed_png(256)).unwrap();
    stego::embed(&mut png, b"written to disk").unwrap();
    std::fs::write(&path, png.serialize()).unwrap();

    let read_back = std::fs::read(&path).unwrap();
    let reparsed = Png::parse(&read_back).unwrap();
    assert_eq!(stego::extract(&reparsed).unwrap(), b"written to disk");
}
