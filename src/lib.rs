//! PNG chunk steganography.
//!
//! Hides arbitrary byte messages in the least-significant bits of PNG
//! palette or image data bytes, keeping the container byte-valid
//! (recomputed checksums, correct chunk framing) after modification.
//!
//! # Features
//!
//! - **Chunk container engine**: parse, validate, mutate, and re-serialize a
//!   length-prefixed, type-tagged, checksummed chunk stream
//! - **Even-spread embedding**: message bits are spread across the whole
//!   carrier with a computed stride rather than clustered at the start
//! - **Length side channel**: the hidden message length rides in the
//!   terminal chunk's length field
//! - **CLI interface**: embed, extract, and inspect from the command line
//!
//! # Architecture
//!
//! ```text
//! Bytes → Parse (chunks + validation) → Plan (slot placement) → Embed/Extract (2 bits per slot) → Serialize
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use png_stego::{stego, Png};
//!
//! let data = std::fs::read("carrier.png").unwrap();
//! let mut png = Png::parse(&data).unwrap();
//!
//! stego::embed(&mut png, b"hidden message").unwrap();
//! std::fs::write("stego.png", png.serialize()).unwrap();
//!
//! let recovered = stego::extract(&png).unwrap();
//! assert_eq!(recovered, b"hidden message");
//! ```

pub mod config;
pub mod error;
pub mod png;
pub mod stego;

pub use config::ParseOptions;
pub use error::{Error, Result};
pub use png::Png;
