use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Native `u64` form, for formats that carry 64-bit integers exactly.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::SnowmintId;

    /// Serialize an ID as its native `u64` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowmintId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native `u64` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails. Every `u64` is a
    /// valid layout, so there is no range check.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowmintId, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(SnowmintId::from_raw)
    }
}

/// Decimal string form, the transport representation for consumers whose
/// number type cannot hold 64-bit integers exactly.
pub mod as_decimal_str {
    use super::{Deserializer, Serializer};
    use crate::SnowmintId;

    /// Serialize an ID as a base-10 digit string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowmintId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize an ID from a base-10 digit string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a non-negative decimal integer that fits in 64 bits
    pub fn deserialize<'de, D>(d: D) -> Result<SnowmintId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = SnowmintId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a decimal ID string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(DecimalVisitor)
    }
}
