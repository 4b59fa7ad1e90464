/// The fields of a decoded [`SnowmintId`], with the timestamp made absolute.
///
/// [`SnowmintId`]: crate::SnowmintId
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Components {
    /// Creation time in Unix milliseconds.
    pub timestamp: u64,
    /// Worker identity, `0..=31`.
    pub worker_id: u8,
    /// Process identity, `0..=31`.
    pub process_id: u8,
    /// Intra-millisecond ordinal, `0..=4095`.
    pub sequence: u16,
}
