use super::read_u64;
use crate::error::{Result, SdkError};

/// Clock sysvar values a quote depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl ClockSnapshot {
    pub const LEN: usize = 40;
    const UNIX_TIMESTAMP_OFFSET: usize = 32;

    pub fn new(slot: u64, unix_timestamp: i64) -> Self {
        Self {
            slot,
            unix_timestamp,
        }
    }

    /// Decode the clock sysvar account:
    /// slot, epoch_start_timestamp, epoch, leader_schedule_epoch, unix_timestamp
    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN {
            return Err(SdkError::AccountDataTooShort {
                account: "clock",
                len: data.len(),
                expected: Self::LEN,
            });
        }
        Ok(Self {
            slot: read_u64("clock", data, 0)?,
            unix_timestamp: read_u64("clock", data, Self::UNIX_TIMESTAMP_OFFSET)? as i64,
        })
    }

    /// Unix timestamp as the unsigned time the curves and vaults use.
    /// A negative timestamp reads as zero.
    pub fn current_time(&self) -> u64 {
        self.unix_timestamp.max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_clock() {
        let mut data = vec![0u8; ClockSnapshot::LEN];
        data[..8].copy_from_slice(&250_000_000u64.to_le_bytes());
        data[32..40].copy_from_slice(&1_700_000_000i64.to_le_bytes());

        let clock = ClockSnapshot::try_from_account_data(&data).unwrap();
        assert_eq!(clock, ClockSnapshot::new(250_000_000, 1_700_000_000));
        assert_eq!(clock.current_time(), 1_700_000_000);
    }

    #[test]
    fn test_negative_timestamp() {
        assert_eq!(ClockSnapshot::new(0, -5).current_time(), 0);
    }
}
