//! Serialize and deserialize octets as IDNA encoded labels.
//!
//! This module can be used with Serde’s `with` attribute. It will
//! serialize an octets sequence as a label produced by the default codec
//! with human readable serializers or as a raw octets sequence for compact
//! serializers.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, Serialize)]
//! struct Beacon {
//!     #[serde(with = "idna_encoding::serde")]
//!     payload: Vec<u8>,
//! }
//! ```

use core::fmt;
use core::marker::PhantomData;
use octseq::builder::{
    EmptyBuilder, FreezeBuilder, FromBuilder, OctetsBuilder, ShortBuf,
};

pub fn serialize<Octets, S>(
    octets: &Octets,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    Octets: AsRef<[u8]> + ?Sized,
    S: serde::Serializer,
{
    if serializer.is_human_readable() {
        let label = crate::encode(octets.as_ref())
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&label)
    } else {
        serializer.serialize_bytes(octets.as_ref())
    }
}

pub fn deserialize<'de, Octets, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Octets, D::Error>
where
    Octets: FromBuilder,
    <Octets as FromBuilder>::Builder: EmptyBuilder,
{
    struct Visitor<Octets>(PhantomData<Octets>);

    impl<'de, Octets> serde::de::Visitor<'de> for Visitor<Octets>
    where
        Octets: FromBuilder,
        <Octets as FromBuilder>::Builder: EmptyBuilder,
    {
        type Value = Octets;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an IDNA encoded label")
        }

        fn visit_str<E: serde::de::Error>(
            self,
            v: &str,
        ) -> Result<Self::Value, E> {
            crate::decode_octets(v).map_err(E::custom)
        }

        fn visit_bytes<E: serde::de::Error>(
            self,
            v: &[u8],
        ) -> Result<Self::Value, E> {
            let mut builder = <Octets as FromBuilder>::Builder::empty();
            builder
                .append_slice(v)
                .map_err(|err| E::custom(Into::<ShortBuf>::into(err)))?;
            Ok(builder.freeze())
        }
    }

    if deserializer.is_human_readable() {
        deserializer.deserialize_str(Visitor(PhantomData))
    } else {
        deserializer.deserialize_bytes(Visitor(PhantomData))
    }
}

//============ Test ==========================================================
