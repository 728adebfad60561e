// File: src/date/moment.rs
// Purpose: Forgiving moment.js style date parsing backed by chrono

use super::{DateFormatError, DateParse, DateParser};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ONE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("pattern compiles"));
static ONE_TO_TWO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\d?").expect("pattern compiles"));
static ONE_TO_THREE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}").expect("pattern compiles"));
static ONE_TO_FOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,4}").expect("pattern compiles"));
static ONE_TO_SIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-]?\d{1,6}").expect("pattern compiles"));
static UNSIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("pattern compiles"));
static SIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]?\d+").expect("pattern compiles"));
static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-]?\d+(\.\d{1,3})?").expect("pattern compiles"));
static OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Z|[+-]\d\d(?::?\d\d)?").expect("pattern compiles"));
static MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[ap]\.?m?\.?").expect("pattern compiles"));
static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}(?:th|st|nd|rd)|\d{1,2}").expect("pattern compiles"));

// Long names first so `march` is not cut short at `mar`
static MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)january|february|march|april|may|june|july|august|september|october|november|december",
        r"|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec",
    ))
    .expect("pattern compiles")
});

static WEEKDAY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)sunday|monday|tuesday|wednesday|thursday|friday|saturday",
        r"|sun|mon|tue|wed|thu|fri|sat|su|mo|tu|we|th|fr|sa",
    ))
    .expect("pattern compiles")
});

// Escaped text is matched so its contents are left alone
static LOCALE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\]|\\?(LTS|LT|LL?L?L?|l{1,4})").expect("pattern compiles")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const WEEKDAYS: [&str; 7] = ["su", "mo", "tu", "we", "th", "fr", "sa"];

// Largest instant a JavaScript date can hold, in milliseconds
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// [`DateParser`] backed by chrono, following moment's forgiving parse mode.
///
/// Each format token is searched for in whatever input is left, so unmatched
/// separators and trailing text are ignored (`2024/01/01` passes under
/// `YYYY-MM-DD`). A value is valid when at least one token matched and the
/// resulting date and time exist: `2023-02-30` and `25:00` are rejected.
/// Components the format leaves out default the way moment does, starting
/// from today's date.
///
/// The English locale formats (`L`, `LL`, `LT`, ...) and ordinal days (`Do`)
/// are understood. Moment tokens without a parser here (eras, `Mo`, zone
/// names, ...) are reported by [`check_format`](DateParser::check_format).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser {
    today: Option<NaiveDate>,
}

impl ChronoDateParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the date used for components a format leaves out
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn resolve(&self, parts: &Parts) -> bool {
        if !parts.matched {
            return false;
        }

        if let Some(ms) = parts.timestamp_ms {
            return ms.is_finite() && ms.abs() <= MAX_TIMESTAMP_MS;
        }

        let hour = match (parts.hour, parts.pm) {
            (Some(h), Some(true)) if h < 12 => Some(h + 12),
            (Some(12), Some(false)) => Some(0),
            (hour, _) => hour,
        };

        let today = self.today();
        let Some((year, month, day)) = self.calendar_date(parts, today) else {
            return false;
        };

        let minute = parts.minute.unwrap_or(0);
        let second = parts.second.unwrap_or(0);
        let millisecond = parts.millisecond.unwrap_or(0);
        let hour_ok = match hour.unwrap_or(0) {
            24 => minute == 0 && second == 0 && millisecond == 0,
            h => (0..=23).contains(&h),
        };

        let in_range = (0..=11).contains(&month)
            && day >= 1
            && day <= days_in_month(year, month)
            && hour_ok
            && (0..=59).contains(&minute)
            && (0..=59).contains(&second)
            && (0..=999).contains(&millisecond);
        if !in_range {
            return false;
        }

        let date = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32 + 1, day as u32));
        match (date, parts.weekday) {
            (None, _) => false,
            (Some(date), Some(weekday)) => weekday == date.weekday().num_days_from_sunday() as i64,
            (Some(_), None) => true,
        }
    }

    /// Year, zero-based month and day after week, day-of-year and default
    /// handling. `None` when a week or day of year overflows.
    fn calendar_date(&self, parts: &Parts, today: NaiveDate) -> Option<(i64, i64, i64)> {
        let mut year = parts.year;
        let mut month = parts.month;
        let mut day = parts.day;

        if parts.has_week_info() && month.is_none() && day.is_none() {
            let date = week_date(parts, today)?;
            year = Some(date.year() as i64);
            month = Some(date.month0() as i64);
            day = Some(date.day() as i64);
        }

        if let Some(ordinal) = parts.day_of_year {
            let y = year.unwrap_or(today.year() as i64);
            if ordinal == 0 || ordinal > days_in_year(y) {
                return None;
            }
            let date = NaiveDate::from_yo_opt(i32::try_from(y).ok()?, ordinal as u32)?;
            month = Some(date.month0() as i64);
            day = Some(date.day() as i64);
        }

        let (ty, tm, td) = (
            today.year() as i64,
            today.month0() as i64,
            today.day() as i64,
        );
        Some(match (year, month, day) {
            (None, None, None) => (ty, tm, td),
            (None, None, Some(d)) => (ty, tm, d),
            (None, Some(m), d) => (ty, m, d.unwrap_or(1)),
            (Some(y), m, d) => (y, m.unwrap_or(0), d.unwrap_or(1)),
        })
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, value: &str, format: &str) -> DateParse {
        let tokens = match tokenize(format) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!("cannot parse dates as `{}`: {}", format, e);
                return DateParse { valid: false };
            }
        };
        let valid = read(&tokens, value).is_some_and(|parts| self.resolve(&parts));
        DateParse { valid }
    }

    fn check_format(&self, format: &str) -> Result<(), DateFormatError> {
        tokenize(format).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearForm {
    TwoDigit,
    UpToFour,
    Extended,
    Signed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year(YearForm),
    Quarter,
    Month,
    MonthName,
    Day,
    DayOrdinal,
    DayOfYear,
    Weekday,
    WeekdayName,
    LocaleWeekday,
    IsoWeekday,
    LocaleWeek,
    IsoWeek,
    LocaleWeekYear(YearForm),
    IsoWeekYear(YearForm),
    Hour,
    Hour12,
    HourFrom1,
    Meridiem,
    Minute,
    Second,
    Fraction { wide: bool },
    Offset,
    UnixSeconds,
    UnixMillis,
}

impl Field {
    fn pattern(self) -> &'static Lazy<Regex> {
        match self {
            Field::Year(form) | Field::LocaleWeekYear(form) | Field::IsoWeekYear(form) => {
                match form {
                    YearForm::TwoDigit => &ONE_TO_TWO,
                    YearForm::UpToFour => &ONE_TO_FOUR,
                    YearForm::Extended => &ONE_TO_SIX,
                    YearForm::Signed => &SIGNED,
                }
            }
            Field::Quarter | Field::LocaleWeekday | Field::IsoWeekday => &ONE_DIGIT,
            Field::Month
            | Field::Day
            | Field::Weekday
            | Field::LocaleWeek
            | Field::IsoWeek
            | Field::Hour
            | Field::Hour12
            | Field::HourFrom1
            | Field::Minute
            | Field::Second => &ONE_TO_TWO,
            Field::MonthName => &MONTH_NAME,
            Field::DayOrdinal => &ORDINAL,
            Field::DayOfYear => &ONE_TO_THREE,
            Field::WeekdayName => &WEEKDAY_NAME,
            Field::Meridiem => &MERIDIEM,
            Field::Fraction { wide: false } => &ONE_TO_THREE,
            Field::Fraction { wide: true } => &UNSIGNED,
            Field::Offset => &OFFSET,
            Field::UnixSeconds => &TIMESTAMP,
            Field::UnixMillis => &SIGNED,
        }
    }
}

/// Replace the English locale formats with the tokens they stand for
fn expand_locale_formats(format: &str) -> String {
    LOCALE_FORMAT
        .replace_all(format, |caps: &Captures| {
            let whole = &caps[0];
            if whole.starts_with('[') || whole.starts_with('\\') {
                return whole.to_string();
            }
            match whole {
                "LTS" => "h:mm:ss A",
                "LT" => "h:mm A",
                "L" => "MM/DD/YYYY",
                "LL" => "MMMM D, YYYY",
                "LLL" => "MMMM D, YYYY h:mm A",
                "LLLL" => "dddd, MMMM D, YYYY h:mm A",
                "l" => "M/D/YYYY",
                "ll" => "MMM D, YYYY",
                "lll" => "MMM D, YYYY h:mm A",
                _ => "ddd, MMM D, YYYY h:mm A",
            }
            .to_string()
        })
        .into_owned()
}

/// Split a moment format into fields and literal text.
///
/// `[...]` and `\x` escape literal text. Letters that are not moment tokens
/// (the `T` in `YYYY-MM-DDTHH:mm`) are literal, as in moment.
fn tokenize(format: &str) -> Result<Vec<Token>, DateFormatError> {
    let chars: Vec<char> = expand_locale_formats(format).chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            if let Some(len) = chars[i + 1..].iter().position(|&ch| ch == ']') {
                let text: String = chars[i + 1..i + 1 + len].iter().collect();
                if !text.is_empty() {
                    tokens.push(Token::Literal(text));
                }
                i += len + 2;
                continue;
            }
        }

        if c == '\\' && i + 1 < chars.len() {
            tokens.push(Token::Literal(chars[i + 1].to_string()));
            i += 2;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
        match classify(c, run, chars.get(i + run).copied())? {
            Some((field, width)) => {
                tokens.push(Token::Field(field));
                i += width;
            }
            None => {
                tokens.push(Token::Literal(c.to_string()));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

/// Field starting at `run` repeats of `c` followed by `after`, and how many
/// characters it spans. `None` for literal text.
fn classify(
    c: char,
    run: usize,
    after: Option<char>,
) -> Result<Option<(Field, usize)>, DateFormatError> {
    let ordinal = run == 1 && after == Some('o');
    let unsupported = |token: String| Err(DateFormatError::UnsupportedToken { token });

    let token = match c {
        'Y' => match run {
            1 => (Field::Year(YearForm::Signed), 1),
            2 | 3 => (Field::Year(YearForm::TwoDigit), 2),
            4 => (Field::Year(YearForm::UpToFour), 4),
            n => (Field::Year(YearForm::Extended), n.min(6)),
        },
        'M' if ordinal => return unsupported("Mo".to_string()),
        'M' => match run {
            1 | 2 => (Field::Month, run),
            n => (Field::MonthName, n.min(4)),
        },
        'Q' if ordinal => return unsupported("Qo".to_string()),
        'Q' => (Field::Quarter, 1),
        'D' if ordinal => (Field::DayOrdinal, 2),
        'D' if run == 3 && after == Some('o') => return unsupported("DDDo".to_string()),
        'D' => match run {
            1 | 2 => (Field::Day, run),
            n => (Field::DayOfYear, n.min(4)),
        },
        'd' if run >= 2 => (Field::WeekdayName, run.min(4)),
        'd' if ordinal => return unsupported("do".to_string()),
        'd' => (Field::Weekday, 1),
        'e' => (Field::LocaleWeekday, 1),
        'E' => (Field::IsoWeekday, 1),
        'w' | 'W' if ordinal => return unsupported(format!("{c}o")),
        'w' => (Field::LocaleWeek, run.min(2)),
        'W' => (Field::IsoWeek, run.min(2)),
        'g' | 'G' if run == 1 => return Ok(None),
        'g' => (Field::LocaleWeekYear(week_year_form(run)), week_year_width(run)),
        'G' => (Field::IsoWeekYear(week_year_form(run)), week_year_width(run)),
        'H' => (Field::Hour, run.min(2)),
        'h' => (Field::Hour12, run.min(2)),
        'k' => (Field::HourFrom1, run.min(2)),
        'a' | 'A' => (Field::Meridiem, 1),
        'm' => (Field::Minute, run.min(2)),
        's' => (Field::Second, run.min(2)),
        'S' => (Field::Fraction { wide: run >= 4 }, run.min(9)),
        'Z' => (Field::Offset, run.min(2)),
        'X' => (Field::UnixSeconds, 1),
        'x' => (Field::UnixMillis, 1),
        'N' => return unsupported("N".repeat(run.min(5))),
        'y' => return unsupported("y".repeat(run.min(4))),
        'z' => return unsupported("z".repeat(run.min(2))),
        _ => return Ok(None),
    };
    Ok(Some(token))
}

fn week_year_form(run: usize) -> YearForm {
    match run {
        2 | 3 => YearForm::TwoDigit,
        4 => YearForm::UpToFour,
        _ => YearForm::Extended,
    }
}

fn week_year_width(run: usize) -> usize {
    match run {
        2 | 3 => 2,
        n => n.min(5),
    }
}

/// Components read from the input, before defaults are applied
#[derive(Debug, Default)]
struct Parts {
    year: Option<i64>,
    // zero-based
    month: Option<i64>,
    day: Option<i64>,
    day_of_year: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
    millisecond: Option<i64>,
    pm: Option<bool>,
    // 0 = Sunday
    weekday: Option<i64>,
    locale_week_year: Option<i64>,
    locale_week: Option<i64>,
    locale_weekday: Option<i64>,
    iso_week_year: Option<i64>,
    iso_week: Option<i64>,
    iso_weekday: Option<i64>,
    timestamp_ms: Option<f64>,
    matched: bool,
}

impl Parts {
    fn has_iso_week(&self) -> bool {
        self.iso_week_year.is_some() || self.iso_week.is_some() || self.iso_weekday.is_some()
    }

    fn has_week_info(&self) -> bool {
        self.has_iso_week()
            || self.locale_week_year.is_some()
            || self.locale_week.is_some()
            || self.locale_weekday.is_some()
            || self.weekday.is_some()
    }

    /// Record one matched token. `None` when a number does not fit.
    fn apply(&mut self, field: Field, input: &str) -> Option<()> {
        match field {
            Field::Year(form) => {
                let year = match form {
                    YearForm::TwoDigit => two_digit_year(int(input)?),
                    YearForm::UpToFour if input.len() == 2 => two_digit_year(int(input)?),
                    _ => int(input)?,
                };
                self.year = Some(year);
            }
            Field::Quarter => self.month = Some((int(input)? - 1) * 3),
            Field::Month => self.month = Some(int(input)? - 1),
            Field::MonthName => self.month = Some(name_index(&MONTHS, input, 3)?),
            Field::Day => self.day = Some(int(input)?),
            Field::DayOrdinal => {
                self.day = Some(int(input.trim_end_matches(|c: char| c.is_ascii_alphabetic()))?)
            }
            Field::DayOfYear => self.day_of_year = Some(int(input)?),
            Field::Weekday => self.weekday = Some(int(input)?),
            Field::WeekdayName => self.weekday = Some(name_index(&WEEKDAYS, input, 2)?),
            Field::LocaleWeekday => self.locale_weekday = Some(int(input)?),
            Field::IsoWeekday => self.iso_weekday = Some(int(input)?),
            Field::LocaleWeek => self.locale_week = Some(int(input)?),
            Field::IsoWeek => self.iso_week = Some(int(input)?),
            Field::LocaleWeekYear(form) => self.locale_week_year = Some(week_year(form, input)?),
            Field::IsoWeekYear(form) => self.iso_week_year = Some(week_year(form, input)?),
            Field::Hour | Field::Hour12 => self.hour = Some(int(input)?),
            Field::HourFrom1 => {
                self.hour = Some(match int(input)? {
                    24 => 0,
                    hour => hour,
                })
            }
            Field::Meridiem => self.pm = Some(input.to_ascii_lowercase().starts_with('p')),
            Field::Minute => self.minute = Some(int(input)?),
            Field::Second => self.second = Some(int(input)?),
            Field::Fraction { .. } => {
                let digits: String = input.chars().chain(std::iter::repeat('0')).take(3).collect();
                self.millisecond = Some(int(&digits)?);
            }
            Field::Offset => {}
            Field::UnixSeconds => self.timestamp_ms = Some(input.parse::<f64>().ok()? * 1000.0),
            Field::UnixMillis => self.timestamp_ms = Some(input.parse::<f64>().ok()?),
        }
        Some(())
    }
}

/// Search for each token in the input left over by the previous one
fn read(tokens: &[Token], value: &str) -> Option<Parts> {
    let mut parts = Parts::default();
    let mut rest = value;

    for token in tokens {
        match token {
            Token::Literal(text) => {
                if let Some(at) = rest.find(text.as_str()) {
                    rest = &rest[at + text.len()..];
                }
            }
            Token::Field(field) => {
                if let Some(found) = field.pattern().find(rest) {
                    parts.matched = true;
                    parts.apply(*field, found.as_str())?;
                    rest = &rest[found.end()..];
                }
            }
        }
    }

    Some(parts)
}

fn int(input: &str) -> Option<i64> {
    input.parse().ok()
}

fn two_digit_year(year: i64) -> i64 {
    year + if year > 68 { 1900 } else { 2000 }
}

fn week_year(form: YearForm, input: &str) -> Option<i64> {
    match form {
        YearForm::TwoDigit => int(input).map(two_digit_year),
        _ => int(input),
    }
}

fn name_index(names: &[&str], input: &str, prefix: usize) -> Option<i64> {
    let lower = input.to_ascii_lowercase();
    let key = lower.get(..prefix)?;
    names.iter().position(|name| *name == key).map(|i| i as i64)
}

fn is_leap(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_year(year: i64) -> i64 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 if is_leap(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

fn iso_weekday(n: i64) -> Option<Weekday> {
    Some(match n {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => return None,
    })
}

/// First day of week 1: the Sunday on or before January 1st
fn locale_week_one(year: i64) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    jan1.checked_sub_signed(Duration::days(jan1.weekday().num_days_from_sunday() as i64))
}

/// Week year and week of `date` in the Sunday-first calendar
fn locale_week_of(date: NaiveDate) -> Option<(i64, i64)> {
    let mut year = date.year() as i64;
    if date >= locale_week_one(year + 1)? {
        year += 1;
    }
    let start = locale_week_one(year)?;
    Some((year, (date - start).num_days() / 7 + 1))
}

/// Date named by week fields, defaulting the rest from `today`
fn week_date(parts: &Parts, today: NaiveDate) -> Option<NaiveDate> {
    if parts.has_iso_week() {
        let year = parts
            .iso_week_year
            .or(parts.year)
            .unwrap_or(today.iso_week().year() as i64);
        let week = parts.iso_week.unwrap_or(1);
        let weekday = iso_weekday(parts.iso_weekday.unwrap_or(1))?;
        return NaiveDate::from_isoywd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(week).ok()?,
            weekday,
        );
    }

    let (current_year, current_week) = locale_week_of(today)?;
    let year = parts.locale_week_year.or(parts.year).unwrap_or(current_year);
    let week = parts.locale_week.unwrap_or(current_week);
    let weekday = parts.weekday.or(parts.locale_weekday).unwrap_or(0);
    if !(0..=6).contains(&weekday) {
        return None;
    }

    let start = locale_week_one(year)?;
    let weeks = (locale_week_one(year + 1)? - start).num_days() / 7;
    if week < 1 || week > weeks {
        return None;
    }
    start.checked_add_signed(Duration::days((week - 1) * 7 + weekday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parser() -> ChronoDateParser {
        // A Saturday
        ChronoDateParser::new().with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[rstest]
    #[case("2024-02-29", "YYYY-MM-DD", true)]
    #[case("2023-02-30", "YYYY-MM-DD", false)]
    #[case("2024-13-01", "YYYY-MM-DD", false)]
    #[case("not a date", "YYYY-MM-DD", false)]
    #[case("", "YYYY-MM-DD", false)]
    #[case("31/12/2024", "DD/MM/YYYY", true)]
    #[case("12:30", "HH:mm", true)]
    #[case("25:00", "HH:mm", false)]
    #[case("24:00", "HH:mm", true)]
    #[case("24:30", "HH:mm", false)]
    #[case("2024-06-01 08:15", "YYYY-MM-DD HH:mm", true)]
    #[case("2024-06-01T08:15", "YYYY-MM-DDTHH:mm", true)]
    #[case("2024-06", "YYYY-MM", true)]
    fn test_calendar_validity(#[case] value: &str, #[case] format: &str, #[case] valid: bool) {
        assert_eq!(parser().parse(value, format).valid, valid);
    }

    #[rstest]
    #[case("2024/01/01", "YYYY-MM-DD")]
    #[case("2024-01-01 extra", "YYYY-MM-DD")]
    #[case("2024.1.5", "YYYY-MM-DD")]
    #[case("on 2024-01-01", "YYYY-MM-DD")]
    #[case("10/1/2024", "DD/MM/YYYY")]
    fn test_forgiving_separators_and_leftovers(#[case] value: &str, #[case] format: &str) {
        assert!(parser().parse(value, format).valid);
    }

    #[rstest]
    #[case("04/01/1990", "L", true)]
    #[case("13/01/1990", "L", false)]
    #[case("4/1/1990", "l", true)]
    #[case("April 1, 1990", "LL", true)]
    #[case("Apr 1, 1990", "ll", true)]
    #[case("3:45 PM", "LT", true)]
    #[case("3:45:10 am", "LTS", true)]
    #[case("Friday, March 1, 2024 9:00 AM", "LLLL", true)]
    #[case("Monday, March 1, 2024 9:00 AM", "LLLL", false)]
    fn test_locale_formats(#[case] value: &str, #[case] format: &str, #[case] valid: bool) {
        assert_eq!(parser().parse(value, format).valid, valid);
    }

    #[rstest]
    #[case("1st", "Do", true)]
    #[case("22nd of March", "Do [of] MMMM", true)]
    #[case("31st", "Do", false)]
    #[case("January 5th, 2024", "MMMM Do, YYYY", true)]
    #[case("Sept 3 2024", "MMM D YYYY", true)]
    fn test_ordinals_and_month_names(#[case] value: &str, #[case] format: &str, #[case] valid: bool) {
        assert_eq!(parser().parse(value, format).valid, valid);
    }

    #[rstest]
    #[case("2024-W09-5", "GGGG-[W]WW-E", true)]
    #[case("2024-W54-1", "GGGG-[W]WW-E", false)]
    #[case("2024-W10-8", "GGGG-[W]WW-E", false)]
    #[case("2024-24", "gggg-ww", true)]
    #[case("2024-53", "gggg-ww", false)]
    #[case("2024 Q3", "YYYY [Q]Q", true)]
    #[case("2024 Q5", "YYYY [Q]Q", false)]
    #[case("2024-366", "YYYY-DDDD", true)]
    #[case("2023-366", "YYYY-DDDD", false)]
    #[case("1718409600", "X", true)]
    #[case("1718409600123", "x", true)]
    fn test_weeks_quarters_and_timestamps(
        #[case] value: &str,
        #[case] format: &str,
        #[case] valid: bool,
    ) {
        assert_eq!(parser().parse(value, format).valid, valid);
    }

    #[test]
    fn test_missing_components_default_from_today() {
        // June 2024 has 30 days
        assert!(parser().parse("30", "DD").valid);
        assert!(!parser().parse("31", "DD").valid);
        assert!(!parser().parse("02/30", "MM/DD").valid);
        assert!(parser().parse("Saturday", "dddd").valid);
    }

    #[test]
    fn test_meridiem() {
        assert!(parser().parse("12:00 am", "h:mm a").valid);
        assert!(parser().parse("11:59 p.m.", "h:mm a").valid);
    }

    #[test]
    fn test_unsupported_tokens_are_reported() {
        let parser = parser();
        assert_eq!(
            parser.check_format("NNNN YYYY"),
            Err(DateFormatError::UnsupportedToken {
                token: "NNNN".to_string()
            })
        );
        assert!(parser.check_format("Mo").is_err());
        assert!(parser.check_format("YYYY zz").is_err());
        assert!(!parser.parse("2024", "YYYY Mo").valid);

        assert!(parser.check_format("YYYY-MM-DD").is_ok());
        assert!(parser.check_format("[Month] MMo").is_ok());
        assert!(parser.check_format("LLLL").is_ok());
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("DD [of] MMM").unwrap(),
            vec![
                Token::Field(Field::Day),
                Token::Literal(" ".to_string()),
                Token::Literal("of".to_string()),
                Token::Literal(" ".to_string()),
                Token::Field(Field::MonthName),
            ]
        );
        assert_eq!(expand_locale_formats("L [LT] \\LT"), "MM/DD/YYYY [LT] \\LT");
    }
}
