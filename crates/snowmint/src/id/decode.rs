use crate::{Components, Result, SnowmintId};

/// Returns the absolute creation time, in Unix milliseconds, of a
/// decimal-encoded ID.
///
/// # Errors
///
/// Returns [`Error::MalformedId`] if `id` is not a non-negative decimal
/// integer that fits in 64 bits.
///
/// # Example
///
/// ```
/// assert_eq!(snowmint::get_timestamp("0").unwrap(), snowmint::CUSTOM_EPOCH_MILLIS);
/// assert!(snowmint::get_timestamp("-1").is_err());
/// ```
///
/// [`Error::MalformedId`]: crate::Error::MalformedId
pub fn get_timestamp(id: &str) -> Result<u64> {
    Ok(id.parse::<SnowmintId>()?.unix_millis())
}

/// Splits a decimal-encoded ID into its timestamp, worker ID, process ID and
/// sequence.
///
/// # Errors
///
/// Returns [`Error::MalformedId`] under the same conditions as
/// [`get_timestamp`].
///
/// # Example
///
/// ```
/// let parts = snowmint::decompose("4329472").unwrap();
/// assert_eq!(parts.timestamp, snowmint::CUSTOM_EPOCH_MILLIS + 1);
/// assert_eq!(parts.worker_id, 1);
/// assert_eq!(parts.process_id, 1);
/// assert_eq!(parts.sequence, 0);
/// ```
///
/// [`Error::MalformedId`]: crate::Error::MalformedId
pub fn decompose(id: &str) -> Result<Components> {
    Ok(id.parse::<SnowmintId>()?.decompose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CUSTOM_EPOCH_MILLIS, Error};

    #[test]
    fn decodes_known_id() {
        // ts delta 2, worker 31, process 0, sequence 7
        let raw = (2u64 << 22) | (31 << 17) | 7;
        let parts = decompose(&raw.to_string()).unwrap();
        assert_eq!(parts.timestamp, CUSTOM_EPOCH_MILLIS + 2);
        assert_eq!(parts.worker_id, 31);
        assert_eq!(parts.process_id, 0);
        assert_eq!(parts.sequence, 7);
        assert_eq!(get_timestamp(&raw.to_string()).unwrap(), parts.timestamp);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["abc", "-5", "", "99999999999999999999"] {
            let expected = Err(Error::MalformedId {
                input: input.to_owned(),
            });
            assert_eq!(decompose(input), expected);
            assert_eq!(get_timestamp(input), expected.map(|_: Components| 0));
        }
    }
}
