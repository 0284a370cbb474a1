//! Shifting octets into a range of Unicode scalar values and back.
//!
//! Before octets can be handed to Punycode, they need to become characters
//! outside of ASCII. This module does so by adding a fixed [`Offset`] to
//! the value of every octet, producing exactly one character per octet.
//! The reverse direction subtracts the offset again and checks that every
//! character actually falls into the 256 characters starting at the
//! offset.
//!
//! The type [`Unshifter`] keeps the state necessary for the reverse
//! direction, similar to the decoders for the base 32 and base 64
//! encodings: characters are pushed one at a time and the octets are
//! collected in an octets builder.

use crate::config;
use core::iter::FusedIterator;
use core::{fmt, slice};
use octseq::builder::{
    EmptyBuilder, FreezeBuilder, FromBuilder, OctetsBuilder, ShortBuf,
};

//------------ Convenience Functions -----------------------------------------

/// Shifts all octets up by the given offset.
///
/// The returned iterator produces exactly one character for each octet in
/// `octets`.
pub fn shift_up(offset: Offset, octets: &[u8]) -> ShiftUp<'_> {
    ShiftUp {
        offset,
        octets: octets.iter(),
    }
}

/// Shifts all characters in a string down by the given offset.
///
/// The function processes the entire string and returns the octets as an
/// `Octets` value. It fails on the first character that is outside the
/// range covered by the offset.
pub fn shift_down<Octets>(
    offset: Offset,
    s: &str,
) -> Result<Octets, ShiftError>
where
    Octets: FromBuilder,
    <Octets as FromBuilder>::Builder: EmptyBuilder,
{
    let mut unshifter =
        Unshifter::<<Octets as FromBuilder>::Builder>::new(offset);
    for ch in s.chars() {
        unshifter.push(ch)?;
    }
    unshifter.finalize()
}

//------------ Offset --------------------------------------------------------

/// The value added to each octet when shifting it into a character.
///
/// An offset is only valid if all the 256 values starting at it are
/// Unicode scalar values. This means that the offset plus 255 must not be
/// larger than `char::MAX` and that the range must not touch the surrogate
/// code points between U+D800 and U+DFFF.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Offset(u32);

impl Offset {
    /// The offset used by the default codec, 0xFF.
    pub const DEFAULT: Self = Offset(config::OFFSET.default());

    /// The smallest possible offset.
    pub const MIN: Self = Offset(config::OFFSET.min());

    /// The largest possible offset.
    pub const MAX: Self = Offset(config::OFFSET.max());

    /// Creates a new offset from its integer value.
    pub const fn new(value: u32) -> Result<Self, OffsetError> {
        if value > config::OFFSET.max() {
            return Err(OffsetError::Overflow(value));
        }
        if value <= SURROGATE_LAST && value + 0xFF >= SURROGATE_FIRST {
            return Err(OffsetError::Surrogate(value));
        }
        Ok(Offset(value))
    }

    /// Returns the integer value of the offset.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Returns the first character of the range covered by the offset.
    pub const fn first(self) -> char {
        self.shift(0x00)
    }

    /// Returns the last character of the range covered by the offset.
    pub const fn last(self) -> char {
        self.shift(0xFF)
    }

    /// Shifts a single octet up by the offset.
    pub const fn shift(self, octet: u8) -> char {
        // SAFETY: `Offset::new` guarantees that all values between the
        //   offset and the offset plus 255 are Unicode scalar values.
        unsafe { char::from_u32_unchecked(self.0 + octet as u32) }
    }
}

//--- Default

impl Default for Offset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//--- TryFrom and From

impl TryFrom<u32> for Offset {
    type Error = OffsetError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Offset> for u32 {
    fn from(offset: Offset) -> Self {
        offset.0
    }
}

//--- Display

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

//------------ ShiftUp -------------------------------------------------------

/// An iterator over octets shifted up into characters.
///
/// This type is returned by [`shift_up`].
#[derive(Clone, Debug)]
pub struct ShiftUp<'a> {
    /// The offset to add to each octet.
    offset: Offset,

    /// The octets still to be shifted.
    octets: slice::Iter<'a, u8>,
}

impl<'a> Iterator for ShiftUp<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.octets.next().map(|&octet| self.offset.shift(octet))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.octets.size_hint()
    }
}

impl<'a> ExactSizeIterator for ShiftUp<'a> {}

impl<'a> FusedIterator for ShiftUp<'a> {}

//------------ Unshifter -----------------------------------------------------

/// Shifts characters back down into octets.
///
/// This type keeps all the state for turning a sequence of characters back
/// into the octets they were shifted up from. Upon success, the unshifter
/// returns the octets.
pub struct Unshifter<Builder> {
    /// The offset to subtract from each character.
    offset: Offset,

    /// The index of the next character.
    index: usize,

    /// The target or an error if something went wrong.
    target: Result<Builder, ShiftError>,
}

impl<Builder: EmptyBuilder> Unshifter<Builder> {
    /// Creates a new, empty unshifter for the given offset.
    pub fn new(offset: Offset) -> Self {
        Unshifter {
            offset,
            index: 0,
            target: Ok(Builder::empty()),
        }
    }
}

impl<Builder: OctetsBuilder> Unshifter<Builder> {
    /// Returns the index of the next character to be pushed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Finalizes the unshifter and returns the octets.
    pub fn finalize(self) -> Result<Builder::Octets, ShiftError>
    where
        Builder: FreezeBuilder,
    {
        self.target.map(FreezeBuilder::freeze)
    }

    /// Shifts down one more character.
    ///
    /// Returns an error as soon as a character is outside the range of the
    /// offset. It is okay to push more characters after the first error.
    /// The method will just keep returning that error.
    pub fn push(&mut self, ch: char) -> Result<(), ShiftError> {
        let target = match self.target.as_mut() {
            Ok(target) => target,
            Err(err) => return Err(*err),
        };
        let index = self.index;
        self.index += 1;

        let value = u32::from(ch);
        let res = if value < self.offset.0 {
            Err(ShiftError::BelowBounds {
                codepoint: ch,
                index,
            })
        } else if value - self.offset.0 > 0xFF {
            Err(ShiftError::AboveBounds {
                codepoint: ch,
                index,
            })
        } else {
            target
                .append_slice(&[(value - self.offset.0) as u8])
                .map_err(|err| ShiftError::from(Into::<ShortBuf>::into(err)))
        };
        if let Err(err) = res {
            self.target = Err(err);
        }
        res
    }
}

//============ Error Types ===================================================

//------------ OffsetError ---------------------------------------------------

/// An offset value was not usable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OffsetError {
    /// Shifting 0xFF by the offset would be beyond `char::MAX`.
    Overflow(u32),

    /// The range covered by the offset includes surrogate code points.
    Surrogate(u32),
}

impl fmt::Display for OffsetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OffsetError::Overflow(value) => {
                write!(f, "offset {:#x} exceeds the Unicode range", value)
            }
            OffsetError::Surrogate(value) => write!(
                f,
                "offset {:#x} overlaps surrogate code points",
                value
            ),
        }
    }
}

impl std::error::Error for OffsetError {}

//------------ ShiftError ----------------------------------------------------

/// A character could not be shifted back down into an octet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShiftError {
    /// The character is smaller than the offset.
    BelowBounds {
        /// The offending character.
        codepoint: char,

        /// The position of the character in the decoded string.
        index: usize,
    },

    /// The character is more than 255 larger than the offset.
    AboveBounds {
        /// The offending character.
        codepoint: char,

        /// The position of the character in the decoded string.
        index: usize,
    },

    /// The buffer to shift into is too short.
    ShortBuf,
}

impl ShiftError {
    /// Returns the offending character if there was one.
    pub fn codepoint(self) -> Option<char> {
        match self {
            ShiftError::BelowBounds { codepoint, .. }
            | ShiftError::AboveBounds { codepoint, .. } => Some(codepoint),
            ShiftError::ShortBuf => None,
        }
    }

    /// Returns the position of the offending character if there was one.
    pub fn index(self) -> Option<usize> {
        match self {
            ShiftError::BelowBounds { index, .. }
            | ShiftError::AboveBounds { index, .. } => Some(index),
            ShiftError::ShortBuf => None,
        }
    }
}

impl From<ShortBuf> for ShiftError {
    fn from(_: ShortBuf) -> Self {
        ShiftError::ShortBuf
    }
}

//--- Display and Error

impl fmt::Display for ShiftError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShiftError::BelowBounds { codepoint, index } => write!(
                f,
                "decoded character U+{:04X} at index {} below encoding bounds",
                u32::from(codepoint),
                index
            ),
            ShiftError::AboveBounds { codepoint, index } => write!(
                f,
                "decoded character U+{:04X} at index {} too large",
                u32::from(codepoint),
                index
            ),
            ShiftError::ShortBuf => fmt::Display::fmt(&ShortBuf, f),
        }
    }
}

impl std::error::Error for ShiftError {}

//============ Constants =====================================================

/// The first surrogate code point.
const SURROGATE_FIRST: u32 = 0xD800;

/// The last surrogate code point.
const SURROGATE_LAST: u32 = 0xDFFF;

//============ Test ==========================================================
