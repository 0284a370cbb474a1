//! Compacting Unicode strings into ASCII labels.
//!
//! The codec relies on an algorithm that turns a string of arbitrary
//! Unicode characters into a string of ASCII letters, digits, and hyphens
//! and back again. This capability is described by the [`Compactor`] trait
//! so that the shifting part of the codec can be used and tested on its
//! own.
//!
//! The default implementation, [`Punycode`], uses the Punycode algorithm
//! as specified in [RFC 3492] and marks its output with the ACE prefix
//! `xn--`, producing what [RFC 5890] calls an A-label. Unlike a full IDNA
//! implementation, it neither maps nor normalizes its input. Such a
//! transformation would not be reversible and would thus break the codec.
//!
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492
//! [RFC 5890]: https://datatracker.ietf.org/doc/html/rfc5890

use core::fmt;
use idna::punycode;
use std::string::String;

//------------ Constants -----------------------------------------------------

/// The ACE (ASCII Compatible Encoding) prefix of A-labels.
pub const ACE_PREFIX: &str = "xn--";

/// Whether a label consists only of ASCII letters, digits, and hyphens.
pub fn is_ldh(label: &str) -> bool {
    label
        .bytes()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == b'-')
}

/// Whether a label begins with the ACE prefix.
///
/// The comparison ignores ASCII case. The function does not check that the
/// rest of the label can actually be decoded.
pub fn has_ace_prefix(label: &str) -> bool {
    label.len() >= ACE_PREFIX.len()
        && label.as_bytes()[..ACE_PREFIX.len()]
            .eq_ignore_ascii_case(ACE_PREFIX.as_bytes())
}

//------------ Compactor -----------------------------------------------------

/// A reversible mapping between Unicode strings and ASCII labels.
///
/// Implementations must guarantee that `to_unicode` exactly reverses
/// `to_ascii` for every string that `to_ascii` accepts. The codec feeds
/// strings whose characters all lie within a block of 256 consecutive
/// Unicode scalar values. An implementation may reject input it cannot
/// handle but it must never silently produce a label that decodes into
/// something else.
pub trait Compactor {
    /// Converts a Unicode string into an ASCII label.
    fn to_ascii(&self, unicode: &str) -> Result<String, CompactError>;

    /// Converts an ASCII label back into the Unicode string.
    fn to_unicode(&self, ascii: &str) -> Result<String, CompactError>;
}

impl<'a, C: Compactor + ?Sized> Compactor for &'a C {
    fn to_ascii(&self, unicode: &str) -> Result<String, CompactError> {
        (**self).to_ascii(unicode)
    }

    fn to_unicode(&self, ascii: &str) -> Result<String, CompactError> {
        (**self).to_unicode(ascii)
    }
}

//------------ Punycode ------------------------------------------------------

/// The Punycode compactor.
///
/// Strings that contain non-ASCII characters are encoded with Punycode and
/// prefixed with `xn--`. Empty strings and ASCII strings that do not
/// already start with the ACE prefix are passed through unchanged. ASCII
/// strings that do start with the prefix are Punycode encoded as well so
/// that decoding them results in the original string again.
///
/// The resulting label must consist of letters, digits, and hyphens only.
/// Strings with ASCII characters other than those, such as spaces, dots,
/// or control characters, are rejected as unencodable.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Punycode;

impl Compactor for Punycode {
    fn to_ascii(&self, unicode: &str) -> Result<String, CompactError> {
        let res = if unicode.is_ascii() && !has_ace_prefix(unicode) {
            unicode.into()
        } else {
            let encoded = punycode::encode_str(unicode)
                .ok_or(CompactError::Unencodable)?;
            let mut res =
                String::with_capacity(ACE_PREFIX.len() + encoded.len());
            res.push_str(ACE_PREFIX);
            res.push_str(&encoded);
            res
        };
        // Punycode copies basic code points verbatim.
        if !is_ldh(&res) {
            return Err(CompactError::Unencodable);
        }
        Ok(res)
    }

    fn to_unicode(&self, ascii: &str) -> Result<String, CompactError> {
        if !ascii.is_ascii() {
            return Err(CompactError::NonAscii);
        }
        if !has_ace_prefix(ascii) {
            return Ok(ascii.into());
        }

        let encoded = &ascii[ACE_PREFIX.len()..];
        if encoded.is_empty() {
            // There is nothing to decode, which is never the result of
            // encoding.
            return Err(CompactError::BadLabel);
        }
        punycode::decode_to_string(encoded).ok_or(CompactError::BadLabel)
    }
}

//============ Error Types ===================================================

//------------ CompactError --------------------------------------------------

/// Converting between a Unicode string and an ASCII label failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompactError {
    /// The Unicode string cannot be encoded.
    ///
    /// Punycode fails on overly long input, for instance. The string may
    /// also contain ASCII characters that are not allowed in a label.
    Unencodable,

    /// The label is not a validly encoded A-label.
    BadLabel,

    /// The label contains characters outside of ASCII.
    NonAscii,
}

//--- Display and Error

impl fmt::Display for CompactError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompactError::Unencodable => f.write_str("unencodable string"),
            CompactError::BadLabel => f.write_str("invalid A-label"),
            CompactError::NonAscii => f.write_str("non-ASCII label"),
        }
    }
}

impl std::error::Error for CompactError {}

//============ Test ==========================================================
