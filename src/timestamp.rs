//! `!!timestamp` text form.
//!
//! Accepted: `YYYY-MM-DD` (midnight UTC) and
//! `YYYY-M-D[Tt ]h:mm:ss[.fraction][ ][Z|±h[h][:mm]]`; a missing zone means UTC.
//! Everything is normalized to UTC. Dumped as RFC 3339 with a `Z` suffix.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Cheap prefix check: four digits and a dash.
pub(crate) fn looks_like_timestamp(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 8 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-'
}

pub(crate) fn parse(s: &str) -> Option<DateTime<Utc>> {
    let mut cur = Cursor { s: s.trim().as_bytes(), pos: 0 };

    let year = cur.number(4, 4)?;
    cur.expect(b'-')?;
    let month = cur.number(1, 2)?;
    cur.expect(b'-')?;
    let day = cur.number(1, 2)?;
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
    if cur.done() {
        // The date-only form requires two-digit month and day.
        if cur.pos != "YYYY-MM-DD".len() {
            return None;
        }
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    if !(cur.eat(b'T') || cur.eat(b't') || cur.skip_blanks()) {
        return None;
    }
    let hour = cur.number(1, 2)?;
    cur.expect(b':')?;
    let minute = cur.number(2, 2)?;
    cur.expect(b':')?;
    let second = cur.number(2, 2)?;
    let mut nanos = 0u32;
    if cur.eat(b'.') {
        let start = cur.pos;
        let mut scale = 100_000_000u32;
        while let Some(d) = cur.digit() {
            nanos += d * scale;
            scale /= 10;
        }
        if cur.pos == start {
            return None;
        }
    }
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    let local = NaiveDateTime::new(date, time);

    cur.skip_blanks();
    let offset_seconds: i64 = if cur.done() || cur.eat(b'Z') || cur.eat(b'z') {
        0
    } else {
        let sign = if cur.eat(b'+') {
            1
        } else if cur.eat(b'-') {
            -1
        } else {
            return None;
        };
        let hours = cur.number(1, 2)? as i64;
        let minutes = if cur.eat(b':') { cur.number(2, 2)? as i64 } else { 0 };
        if hours > 23 || minutes > 59 {
            return None;
        }
        sign * (hours * 3600 + minutes * 60)
    };
    if !cur.done() {
        return None;
    }
    Some(Utc.from_utc_datetime(&local) - Duration::seconds(offset_seconds))
}

/// Canonical text: RFC 3339, UTC, `Z` suffix, fraction only when present.
pub(crate) fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

struct Cursor<'a> {
    s: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn done(&self) -> bool {
        self.pos == self.s.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.s.get(self.pos) == Some(&b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Option<()> {
        self.eat(b).then_some(())
    }

    fn skip_blanks(&mut self) -> bool {
        let start = self.pos;
        while self.eat(b' ') || self.eat(b'\t') {}
        self.pos > start
    }

    fn digit(&mut self) -> Option<u32> {
        let b = *self.s.get(self.pos)?;
        if b.is_ascii_digit() {
            self.pos += 1;
            Some((b - b'0') as u32)
        } else {
            None
        }
    }

    fn number(&mut self, min: usize, max: usize) -> Option<u32> {
        let mut value = 0u32;
        let mut count = 0;
        while count < max {
            match self.digit() {
                Some(d) => value = value * 10 + d,
                None => break,
            }
            count += 1;
        }
        (count >= min).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn date_only_is_midnight_utc() {
        let t = parse("2002-12-14").unwrap();
        assert_eq!(format(&t), "2002-12-14T00:00:00Z");
    }

    #[test]
    fn canonical_and_spaced_forms() {
        let canonical = parse("2001-12-15T02:59:43.1Z").unwrap();
        let spaced = parse("2001-12-14 21:59:43.10 -5").unwrap();
        let iso = parse("2001-12-14t21:59:43.10-05:00").unwrap();
        assert_eq!(canonical, spaced);
        assert_eq!(canonical, iso);
        assert_eq!(canonical.nanosecond(), 100_000_000);
        assert_eq!(format(&canonical), "2001-12-15T02:59:43.100Z");
    }

    #[test]
    fn no_zone_means_utc() {
        let t = parse("2001-12-14 21:59:43").unwrap();
        assert_eq!(format(&t), "2001-12-14T21:59:43Z");
    }

    #[test]
    fn rejects_non_timestamps() {
        assert!(parse("2001-13-01").is_none());
        assert!(parse("2001-12-14 x").is_none());
        assert!(parse("2001-12-14T25:00:00Z").is_none());
        assert!(parse("hello").is_none());
        assert!(!looks_like_timestamp("12-14"));
    }
}
