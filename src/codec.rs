//! Encoding octets as domain name labels.
//!
//! A [`Codec`] combines shifting octets into a Unicode range, as provided
//! by the [`shift`][crate::shift] module, with a [`Compactor`] that turns
//! the shifted string into an ASCII label.
//!
//! Codecs are immutable values. Once created, they can be shared freely
//! between threads and used for any number of encoding and decoding
//! operations.

use crate::compact::{CompactError, Compactor, Punycode};
use crate::shift::{self, Offset, OffsetError, ShiftError};
use core::fmt;
use octseq::builder::{EmptyBuilder, FromBuilder};
use std::string::String;
use std::vec::Vec;
use tracing::{debug, trace};

//------------ Constants -----------------------------------------------------

/// The maximum length of a label in a domain name.
pub const LABEL_MAX_LEN: usize = 63;

//------------ Codec ---------------------------------------------------------

/// A codec between octets and domain name labels.
///
/// The codec is configured with the [`Offset`] used for shifting octets
/// into characters and the [`Compactor`] used to turn those into an ASCII
/// label. By default, it uses [`Punycode`].
///
/// Labels produced by the codec can only be decoded by a codec with the
/// same offset and compactor.
///
/// ```
/// use idna_encoding::{Codec, Offset};
///
/// let codec = Codec::new(Offset::new(0x1000).unwrap());
/// let label = codec.encode(b"octets").unwrap();
/// assert!(label.starts_with("xn--"));
/// assert_eq!(codec.decode(&label).unwrap(), b"octets");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
pub struct Codec<C = Punycode> {
    /// The offset for shifting octets.
    #[cfg_attr(feature = "serde", serde(default))]
    offset: Offset,

    /// The compactor for turning shifted octets into a label.
    #[cfg_attr(feature = "serde", serde(skip))]
    compactor: C,

    /// Whether to enforce the maximum length of a label.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "check_label_len")
    )]
    check_len: bool,
}

impl Codec {
    /// The default codec.
    ///
    /// This codec uses [`Offset::DEFAULT`] and Punycode and does not limit
    /// the length of labels.
    pub const DEFAULT: Self = Self::new(Offset::DEFAULT);

    /// Creates a new Punycode codec using the given offset.
    pub const fn new(offset: Offset) -> Self {
        Self::with_compactor(offset, Punycode)
    }

    /// Creates a new Punycode codec from the integer value of an offset.
    ///
    /// Returns an error if the value is not a valid offset.
    pub const fn from_value(value: u32) -> Result<Self, OffsetError> {
        match Offset::new(value) {
            Ok(offset) => Ok(Self::new(offset)),
            Err(err) => Err(err),
        }
    }
}

impl<C> Codec<C> {
    /// Creates a new codec from an offset and a compactor.
    pub const fn with_compactor(offset: Offset, compactor: C) -> Self {
        Codec {
            offset,
            compactor,
            check_len: false,
        }
    }

    /// Returns a codec that limits labels to [`LABEL_MAX_LEN`] characters.
    ///
    /// Encoding fails if the resulting label would be longer and labels
    /// that are longer will not be decoded at all.
    #[must_use]
    pub const fn check_label_len(mut self) -> Self {
        self.check_len = true;
        self
    }

    /// Returns the offset of the codec.
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns a reference to the compactor of the codec.
    pub const fn compactor(&self) -> &C {
        &self.compactor
    }

    /// Returns whether the codec limits the length of labels.
    pub const fn checks_label_len(&self) -> bool {
        self.check_len
    }
}

impl<C: Compactor> Codec<C> {
    /// Encodes octets into a label.
    pub fn encode(&self, octets: &[u8]) -> Result<String, EncodeError> {
        let shifted: String = shift::shift_up(self.offset, octets).collect();
        let label = self.compactor.to_ascii(&shifted)?;
        if self.check_len && label.len() > LABEL_MAX_LEN {
            return Err(EncodeError::LongLabel(label.len()));
        }
        trace!(
            offset = %self.offset,
            octets = octets.len(),
            label = %label,
            "encoded label"
        );
        Ok(label)
    }

    /// Decodes a label into a vec of octets.
    pub fn decode(&self, label: &str) -> Result<Vec<u8>, DecodeError> {
        self.decode_octets(label)
    }

    /// Decodes a label into an octets sequence.
    ///
    /// Either the complete label is decoded or an error is returned. No
    /// partially decoded octets are ever returned.
    pub fn decode_octets<Octets>(
        &self,
        label: &str,
    ) -> Result<Octets, DecodeError>
    where
        Octets: FromBuilder,
        <Octets as FromBuilder>::Builder: EmptyBuilder,
    {
        let res = self.decode_label(label);
        match &res {
            Ok(_) => trace!(offset = %self.offset, label, "decoded label"),
            Err(err) => debug!(
                offset = %self.offset,
                label,
                "rejected label: {}",
                err
            ),
        }
        res
    }

    fn decode_label<Octets>(&self, label: &str) -> Result<Octets, DecodeError>
    where
        Octets: FromBuilder,
        <Octets as FromBuilder>::Builder: EmptyBuilder,
    {
        if self.check_len && label.len() > LABEL_MAX_LEN {
            return Err(DecodeError::LongLabel(label.len()));
        }
        let unicode = self.compactor.to_unicode(label)?;
        Ok(shift::shift_down(self.offset, &unicode)?)
    }
}

//============ Error Types ===================================================

//------------ EncodeError ---------------------------------------------------

/// Encoding octets into a label failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeError {
    /// The compactor rejected the shifted octets.
    Compaction(CompactError),

    /// The label would be longer than allowed.
    ///
    /// This only happens if the codec was asked to check the length of
    /// labels. The value is the length of the encoded label.
    LongLabel(usize),
}

impl From<CompactError> for EncodeError {
    fn from(err: CompactError) -> Self {
        EncodeError::Compaction(err)
    }
}

//--- Display and Error

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EncodeError::Compaction(ref err) => {
                write!(f, "failed to encode label: {}", err)
            }
            EncodeError::LongLabel(len) => write!(
                f,
                "encoded label of {} characters exceeds {} characters",
                len, LABEL_MAX_LEN
            ),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            EncodeError::Compaction(ref err) => Some(err),
            EncodeError::LongLabel(_) => None,
        }
    }
}

//------------ DecodeError ---------------------------------------------------

/// Decoding a label into octets failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The compactor could not decode the label.
    Compaction(CompactError),

    /// A decoded character could not be shifted back into an octet.
    ///
    /// This happens if the label was encoded by a different codec.
    Shift(ShiftError),

    /// The label is longer than allowed.
    ///
    /// This only happens if the codec was asked to check the length of
    /// labels.
    LongLabel(usize),
}

impl DecodeError {
    /// Whether a decoded character was smaller than the offset.
    pub fn is_below_bounds(&self) -> bool {
        matches!(self, DecodeError::Shift(ShiftError::BelowBounds { .. }))
    }

    /// Whether a decoded character was too large for the offset.
    pub fn is_above_bounds(&self) -> bool {
        matches!(self, DecodeError::Shift(ShiftError::AboveBounds { .. }))
    }
}

impl From<CompactError> for DecodeError {
    fn from(err: CompactError) -> Self {
        DecodeError::Compaction(err)
    }
}

impl From<ShiftError> for DecodeError {
    fn from(err: ShiftError) -> Self {
        DecodeError::Shift(err)
    }
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::Compaction(ref err) => {
                write!(f, "failed to decode label: {}", err)
            }
            DecodeError::Shift(ref err) => fmt::Display::fmt(err, f),
            DecodeError::LongLabel(len) => write!(
                f,
                "label of {} characters exceeds {} characters",
                len, LABEL_MAX_LEN
            ),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            DecodeError::Compaction(ref err) => Some(err),
            DecodeError::Shift(ref err) => Some(err),
            DecodeError::LongLabel(_) => None,
        }
    }
}

//============ Test ==========================================================
