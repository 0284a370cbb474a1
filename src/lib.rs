//! Encoding arbitrary octets as IDNA domain name labels.
//!
//! This crate turns any sequence of octets into a string that consists of
//! ASCII letters, digits, and hyphens only and can thus be used as a label
//! in a domain name. The string can later be decoded back into exactly the
//! original octets.
//!
//! Encoding happens in two steps. First, every octet is shifted into a
//! character outside of ASCII by adding a fixed [`Offset`] to its value.
//! Second, the resulting string is converted into an A-label using the
//! Punycode algorithm, i.e., an ASCII label starting with `xn--`. Decoding
//! reverses both steps and checks that every decoded character is within
//! the range covered by the offset.
//!
//! ```
//! let label = idna_encoding::encode(b"abc123").unwrap();
//! assert_eq!(label, "xn--bfacd5pfg");
//! assert_eq!(idna_encoding::decode(&label).unwrap(), b"abc123");
//! ```
//!
//! The functions at the crate root use the default [`Codec`] with an
//! offset of 0xFF. A codec with a different offset produces different
//! labels and only decodes labels it has produced itself:
//!
//! ```
//! use idna_encoding::Codec;
//!
//! let codec = Codec::from_value(0x400).unwrap();
//! let label = codec.encode(b"\x00").unwrap();
//! assert_ne!(label, idna_encoding::encode(b"\x00").unwrap());
//! assert!(idna_encoding::decode(&label).is_err());
//! ```
//!
//! # Modules
//!
//! * [shift] shifts octets into characters and back,
//! * [compact] converts strings of characters into ASCII labels and back,
//! * [codec] combines the two into a [`Codec`].
//!
//! # Label length
//!
//! A label in a domain name can be at most 63 characters long. By
//! default, the codec does not enforce this limit and leaves it to the
//! compactor to reject input it cannot handle. A codec that enforces the
//! limit can be created via [`Codec::check_label_len`].
//!
//! # Reference of Feature Flags
//!
//! * `bytes`: Enables decoding into the types `Bytes` and `BytesMut` from
//!   the [bytes](https://github.com/tokio-rs/bytes) crate.
//! * `heapless`: Enables decoding into the `Vec` type from the
//!   [heapless](https://github.com/japaric/heapless) crate.
//! * `serde`: Enables serialization of offsets and codecs as well as the
#![cfg_attr(feature = "serde", doc = "  [serde]")]
#![cfg_attr(not(feature = "serde"), doc = "  serde")]
//!   module for encoding octets sequences as labels when serializing.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod compact;
pub mod config;
#[cfg(feature = "serde")]
pub mod serde;
pub mod shift;

pub use self::codec::{Codec, DecodeError, EncodeError, LABEL_MAX_LEN};
pub use self::compact::{CompactError, Compactor, Punycode};
pub use self::shift::{Offset, OffsetError, ShiftError};

use octseq::builder::{EmptyBuilder, FromBuilder};

//------------ Default Codec -------------------------------------------------

/// The codec used by the functions at the crate root.
pub static DEFAULT_CODEC: Codec = Codec::DEFAULT;

/// Encodes octets into a label using the default codec.
pub fn encode(octets: &[u8]) -> Result<String, EncodeError> {
    DEFAULT_CODEC.encode(octets)
}

/// Decodes a label produced by [`encode`].
pub fn decode(label: &str) -> Result<Vec<u8>, DecodeError> {
    DEFAULT_CODEC.decode(label)
}

/// Decodes a label produced by [`encode`] into an octets sequence.
pub fn decode_octets<Octets>(label: &str) -> Result<Octets, DecodeError>
where
    Octets: FromBuilder,
    <Octets as FromBuilder>::Builder: EmptyBuilder,
{
    DEFAULT_CODEC.decode_octets(label)
}
