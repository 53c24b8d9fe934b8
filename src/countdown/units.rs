//! Seconds to day/hour/minute/second breakdown and digit splitting.

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Calendar-agnostic breakdown of a number of seconds. Days are unbounded;
/// the other fields stay within their natural range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeUnits {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeUnits {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Countdown values can go negative with a negative bound; those render
    /// as zero.
    pub fn from_count(count: i64) -> Self {
        Self::from_seconds(u64::try_from(count).unwrap_or(0))
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    /// Fields in display order: days, hours, minutes, seconds.
    pub fn fields(&self) -> [u64; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
    }
}

/// Decimal digits of `value`, most significant first, left-padded with zeros
/// to at least `min_width`.
pub fn digits(value: u64, min_width: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(min_width.max(2));
    let mut rest = value;
    loop {
        out.push((rest % 10) as u8);
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    while out.len() < min_width {
        out.push(0);
    }
    out.reverse();
    out
}
