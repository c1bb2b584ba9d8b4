use time::Date;
use time::OffsetDateTime;
use time::UtcOffset;

/// Source of "today" for scheduling and ranking. Commands read it once at
/// startup and pass the date down, so one invocation sees a single
/// consistent day even across midnight.
pub trait Clock {
    fn today(&self) -> Date;
}

/// Day boundaries are fixed to Japan Standard Time (UTC+9, no DST), the
/// zone the study log is kept in, regardless of where the binary runs.
pub struct JstClock;

impl Clock for JstClock {
    fn today(&self) -> Date {
        let jst = UtcOffset::from_hms(9, 0, 0).expect("valid offset");

        OffsetDateTime::now_utc().to_offset(jst).date()
    }
}
