use time::{macros::offset, OffsetDateTime, UtcOffset};

/// All stored timestamps use Indian Standard Time.
pub const IST: UtcOffset = offset!(+5:30);

pub fn now_ist() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(IST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ist_is_five_thirty_ahead_of_utc() {
        assert_eq!(IST.whole_hours(), 5);
        assert_eq!(IST.minutes_past_hour(), 30);
    }

    #[test]
    fn now_carries_ist_offset_but_same_instant() {
        let now = now_ist();
        assert_eq!(now.offset(), IST);
        let utc = OffsetDateTime::now_utc();
        assert!((utc - now).whole_seconds().abs() < 5);
    }
}
