use core::{fmt, str::FromStr};

use crate::{CUSTOM_EPOCH_MILLIS, Components, Error, Result};

/// A 64-bit Snowflake ID carrying worker and process identity.
///
/// - 42 bits timestamp (ms since [`CUSTOM_EPOCH`])
/// - 5 bits worker ID
/// - 5 bits process ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             22 21          17 16           12 11             0
///              +----------------+--------------+---------------+---------------+
///  Field:      | timestamp (42) | worker ID (5)| process ID (5)| sequence (12) |
///              +----------------+--------------+---------------+---------------+
///              |<----------- MSB ------------ 64 bits ------------ LSB ------->|
/// ```
///
/// The value is rendered as a base-10 digit string for transport, since the
/// full 64-bit range exceeds what some consumers can represent exactly.
///
/// ```
/// use snowmint::SnowmintId;
///
/// let id = SnowmintId::from(1000, 2, 3, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.worker_id(), 2);
/// assert_eq!(id.process_id(), 3);
/// assert_eq!(id.sequence(), 1);
///
/// let parsed: SnowmintId = id.to_string().parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
///
/// [`CUSTOM_EPOCH`]: crate::CUSTOM_EPOCH
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowmintId {
    id: u64,
}

// The four fields exactly cover the carrier type.
const _: () = assert!(
    SnowmintId::TIMESTAMP_BITS
        + SnowmintId::WORKER_ID_BITS
        + SnowmintId::PROCESS_ID_BITS
        + SnowmintId::SEQUENCE_BITS
        == u64::BITS
);

impl SnowmintId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 42;

    /// Width of the worker ID field.
    pub const WORKER_ID_BITS: u32 = 5;

    /// Width of the process ID field.
    pub const PROCESS_ID_BITS: u32 = 5;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 17
    /// through 21.
    pub const WORKER_ID_MASK: u64 = (1 << Self::WORKER_ID_BITS) - 1;

    /// Bitmask for extracting the 5-bit process ID field. Occupies bits 12
    /// through 16.
    pub const PROCESS_ID_MASK: u64 = (1 << Self::PROCESS_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 =
        Self::WORKER_ID_BITS + Self::PROCESS_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the worker ID to its correct position (bit 17).
    pub const WORKER_ID_SHIFT: u32 = Self::PROCESS_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the process ID to its correct position (bit 12).
    pub const PROCESS_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Largest valid worker ID.
    pub const MAX_WORKER_ID: u8 = Self::WORKER_ID_MASK as u8;

    /// Largest valid process ID.
    pub const MAX_PROCESS_ID: u8 = Self::PROCESS_ID_MASK as u8;

    /// Largest valid sequence value.
    pub const MAX_SEQUENCE: u16 = Self::SEQUENCE_MASK as u16;

    /// Largest timestamp delta (ms since the epoch) the layout can hold.
    pub const MAX_TIMESTAMP: u64 = Self::TIMESTAMP_MASK;

    /// Packs the four fields into an ID. Each field is masked to its width.
    pub const fn from(timestamp: u64, worker_id: u8, process_id: u8, sequence: u16) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id as u64 & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let process_id = (process_id as u64 & Self::PROCESS_ID_MASK) << Self::PROCESS_ID_SHIFT;
        let sequence = (sequence as u64 & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | process_id | sequence,
        }
    }

    /// Wraps a raw 64-bit value. Every `u64` is a valid layout.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the packed 64-bit value.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp delta (ms since the epoch) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u8 {
        ((self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK) as u8
    }

    /// Extracts the process ID from the packed ID.
    pub const fn process_id(&self) -> u8 {
        ((self.id >> Self::PROCESS_ID_SHIFT) & Self::PROCESS_ID_MASK) as u8
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Returns the absolute creation time in Unix milliseconds.
    pub const fn unix_millis(&self) -> u64 {
        self.timestamp() + CUSTOM_EPOCH_MILLIS
    }

    /// Splits the ID into its fields, with the timestamp made absolute.
    pub const fn decompose(&self) -> Components {
        Components {
            timestamp: self.unix_millis(),
            worker_id: self.worker_id(),
            process_id: self.process_id(),
            sequence: self.sequence(),
        }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Unlike [`Display`](fmt::Display), the padded form sorts
    /// lexicographically in the same order as the numeric value.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for SnowmintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowmintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowmintId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("process_id", &self.process_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for SnowmintId {
    type Err = Error;

    /// Parses the decimal transport form.
    ///
    /// Only ASCII digits are accepted: no sign, no whitespace, and the value
    /// must fit in 64 bits.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedId {
            input: s.to_owned(),
        };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        s.parse::<u64>().map(Self::from_raw).map_err(|_| malformed())
    }
}

impl From<u64> for SnowmintId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowmintId> for u64 {
    fn from(id: SnowmintId) -> Self {
        id.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_positions_match_layout() {
        let id = SnowmintId::from(1, 1, 1, 1);
        assert_eq!(id.to_raw(), (1 << 22) | (1 << 17) | (1 << 12) | 1);
    }

    #[test]
    fn max_fields_fill_every_bit() {
        let id = SnowmintId::from(
            SnowmintId::MAX_TIMESTAMP,
            SnowmintId::MAX_WORKER_ID,
            SnowmintId::MAX_PROCESS_ID,
            SnowmintId::MAX_SEQUENCE,
        );
        assert_eq!(id.to_raw(), u64::MAX);
        assert_eq!(id.timestamp(), SnowmintId::MAX_TIMESTAMP);
        assert_eq!(id.worker_id(), 31);
        assert_eq!(id.process_id(), 31);
        assert_eq!(id.sequence(), 4095);
    }

    #[test]
    fn oversized_fields_are_masked() {
        let id = SnowmintId::from(0, 0xff, 0, 0);
        assert_eq!(id.worker_id(), 31);
        assert_eq!(id.process_id(), 0);
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let a = SnowmintId::from(10, 31, 31, 4095);
        let b = SnowmintId::from(11, 0, 0, 0);
        let c = SnowmintId::from(11, 0, 0, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(SnowmintId::from_raw(4_198_400).to_string(), "4198400");
        assert_eq!(
            SnowmintId::from_raw(4_198_400).to_padded_string(),
            "00000000000004198400"
        );
    }

    #[test]
    fn parse_rejects_non_digits() {
        for input in ["", "-1", "+1", " 1", "12a", "0x10", "1.0"] {
            assert_eq!(
                input.parse::<SnowmintId>(),
                Err(Error::MalformedId {
                    input: input.to_owned()
                }),
                "{input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_values_above_u64() {
        assert!("18446744073709551616".parse::<SnowmintId>().is_err());
        assert_eq!(
            "18446744073709551615".parse::<SnowmintId>(),
            Ok(SnowmintId::from_raw(u64::MAX))
        );
    }

    #[test]
    fn decompose_makes_timestamp_absolute() {
        let parts = SnowmintId::from(5, 3, 4, 6).decompose();
        assert_eq!(
            parts,
            Components {
                timestamp: CUSTOM_EPOCH_MILLIS + 5,
                worker_id: 3,
                process_id: 4,
                sequence: 6,
            }
        );
    }
}
