use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use time::{macros::format_description, Date, PrimitiveDateTime, Time, UtcOffset};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid date format: {value}. Expected format: YYYY-MM-DDTHH:MM:SS")]
pub struct DateFormatError {
    pub value: String,
}

/// A date-time as written in ISO-8601 extended form, with an optional UTC offset.
///
/// SolarNetwork's `localStartDate`/`localEndDate` are node-local times, so the
/// offset is only carried through when the caller wrote one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalDateTime {
    pub datetime: PrimitiveDateTime,
    pub offset: Option<UtcOffset>,
}

impl LocalDateTime {
    pub fn new(datetime: PrimitiveDateTime) -> Self {
        LocalDateTime {
            datetime,
            offset: None,
        }
    }

    /// `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`
    pub fn iso_format(&self) -> String {
        self.format_with_separator('T')
    }

    fn format_with_separator(&self, separator: char) -> String {
        let date = self.datetime.date();
        let time = self.datetime.time();
        let mut formatted = format!(
            "{:04}-{:02}-{:02}{}{:02}:{:02}:{:02}",
            date.year(),
            u8::from(date.month()),
            date.day(),
            separator,
            time.hour(),
            time.minute(),
            time.second()
        );
        if time.microsecond() != 0 {
            formatted.push_str(&format!(".{:06}", time.microsecond()));
        }
        if let Some(offset) = self.offset {
            let sign = if offset.is_negative() { '-' } else { '+' };
            formatted.push_str(&format!(
                "{}{:02}:{:02}",
                sign,
                offset.whole_hours().unsigned_abs(),
                offset.minutes_past_hour().unsigned_abs()
            ));
            if offset.seconds_past_minute() != 0 {
                formatted.push_str(&format!(":{:02}", offset.seconds_past_minute().unsigned_abs()));
            }
        }
        formatted
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_separator(' '))
    }
}

impl FromStr for LocalDateTime {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateFormatError {
            value: s.to_string(),
        };
        let date_part = s.get(..10).ok_or_else(invalid)?;
        let date = Date::parse(date_part, format_description!("[year]-[month]-[day]"))
            .map_err(|_| invalid())?;
        if date.year() < 1 {
            return Err(invalid());
        }

        let rest = &s[10..];
        if rest.is_empty() {
            return Ok(LocalDateTime::new(date.midnight()));
        }
        let rest = rest
            .strip_prefix('T')
            .or_else(|| rest.strip_prefix(' '))
            .ok_or_else(invalid)?;

        // Anything from the first Z, + or - onwards is the offset
        let (time_part, offset_part) = match rest.find(&['Z', '+', '-'][..]) {
            Some(index) => (&rest[..index], Some(&rest[index..])),
            None => (rest, None),
        };
        let time = parse_time(time_part).ok_or_else(invalid)?;
        let offset = match offset_part {
            Some(offset) => Some(parse_offset(offset).ok_or_else(invalid)?),
            None => None,
        };
        Ok(LocalDateTime {
            datetime: PrimitiveDateTime::new(date, time),
            offset,
        })
    }
}

fn two_digits(s: &str) -> Option<u8> {
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f` with one to nine fraction digits.
fn parse_time(s: &str) -> Option<Time> {
    let (clock, fraction) = match s.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (s, None),
    };
    let fields: Vec<&str> = clock.split(':').collect();
    if fields.len() > 3 || (fraction.is_some() && fields.len() != 3) {
        return None;
    }
    let hour = two_digits(fields[0])?;
    let minute = match fields.get(1) {
        Some(field) => two_digits(field)?,
        None => 0,
    };
    let second = match fields.get(2) {
        Some(field) => two_digits(field)?,
        None => 0,
    };
    let nanosecond = match fraction {
        Some(digits) => {
            if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            format!("{:0<9}", digits).parse().ok()?
        }
        None => 0,
    };
    Time::from_hms_nano(hour, minute, second, nanosecond).ok()
}

/// `Z`, `±HH:MM`, `±HHMM` or `±HH:MM:SS`.
fn parse_offset(s: &str) -> Option<UtcOffset> {
    if s == "Z" {
        return Some(UtcOffset::UTC);
    }
    let sign: i8 = match s.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let body = &s[1..];
    let (hours, minutes, seconds) = match body.len() {
        4 => (body.get(..2)?, body.get(2..)?, None),
        5 if body.as_bytes()[2] == b':' => (body.get(..2)?, body.get(3..)?, None),
        8 if body.as_bytes()[2] == b':' && body.as_bytes()[5] == b':' => {
            (body.get(..2)?, body.get(3..5)?, Some(body.get(6..)?))
        }
        _ => return None,
    };
    let hours = two_digits(hours)? as i8;
    let minutes = two_digits(minutes)? as i8;
    let seconds = match seconds {
        Some(seconds) => two_digits(seconds)? as i8,
        None => 0,
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    UtcOffset::from_hms(sign * hours, sign * minutes, sign * seconds).ok()
}
