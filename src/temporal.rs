// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

const FRACTION_MASK: u64 = (1 << 24) - 1;
const HMS_MASK: u64 = (1 << 17) - 1;
const DAY_MASK: u64 = (1 << 5) - 1;
const SIX_BIT_MASK: u64 = (1 << 6) - 1;
const TIME_HOUR_MASK: u64 = (1 << 10) - 1;
const MONTHS_PER_YEAR_PACKED: u64 = 13;

/// The logical column type a temporal opaque value was stored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    Timestamp,
}

/// A date, time or datetime unpacked from its 8-byte packed representation.
///
/// Fields are kept as stored, zero dates such as `0000-00-00` are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temporal {
    pub kind: TemporalKind,
    pub negative: bool,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
}

impl Temporal {
    /// Unpacks a date, datetime or timestamp.
    ///
    /// Layout of the absolute value, from the high bits down: 17 bits of
    /// `year * 13 + month`, 5 bits of day, 5 bits of hour, 6 bits of minute,
    /// 6 bits of second and 24 bits of microseconds.
    pub fn from_packed_datetime(kind: TemporalKind, packed: i64) -> Temporal {
        let negative = packed < 0;
        let v = packed.unsigned_abs();
        let ymdhms = v >> 24;
        let ymd = ymdhms >> 17;
        let ym = ymd >> 5;
        let hms = ymdhms & HMS_MASK;
        Temporal {
            kind,
            negative,
            year: (ym / MONTHS_PER_YEAR_PACKED) as u32,
            month: (ym % MONTHS_PER_YEAR_PACKED) as u32,
            day: (ymd & DAY_MASK) as u32,
            hour: (hms >> 12) as u32,
            minute: ((hms >> 6) & SIX_BIT_MASK) as u32,
            second: (hms & SIX_BIT_MASK) as u32,
            microsecond: (v & FRACTION_MASK) as u32,
        }
    }

    /// Unpacks a time of day or duration, hours go up to 1023.
    pub fn from_packed_time(packed: i64) -> Temporal {
        let negative = packed < 0;
        let v = packed.unsigned_abs();
        let hms = v >> 24;
        Temporal {
            kind: TemporalKind::Time,
            negative,
            year: 0,
            month: 0,
            day: 0,
            hour: ((hms >> 12) & TIME_HOUR_MASK) as u32,
            minute: ((hms >> 6) & SIX_BIT_MASK) as u32,
            second: (hms & SIX_BIT_MASK) as u32,
            microsecond: (v & FRACTION_MASK) as u32,
        }
    }
}

impl Display for Temporal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        match self.kind {
            TemporalKind::Date => {
                write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
            }
            TemporalKind::Time => write!(
                f,
                "{:02}:{:02}:{:02}.{:06}",
                self.hour, self.minute, self.second, self.microsecond
            ),
            TemporalKind::DateTime | TemporalKind::Timestamp => write!(
                f,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                self.year,
                self.month,
                self.day,
                self.hour,
                self.minute,
                self.second,
                self.microsecond
            ),
        }
    }
}
