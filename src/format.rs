//! Brazilian display formatting: progressive input masks for phone, CPF,
//! RG and dates, BRL currency rendering, and the `dd/mm/yyyy` form-date
//! parsing used on the way into the store.
//!
//! The masks are progressive: they accept partially typed input and
//! format whatever digits are present, so they can run on every
//! keystroke of a controlled field.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid date regex"));

fn digits(raw: &str, cap: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(cap).collect()
}

/// Progressive phone mask. Ten digits render as a landline
/// (`(11) 3333-4444`); anything longer or still in progress uses the
/// mobile split (`(11) 98765-4321`). Input is capped at 11 digits.
pub fn format_phone(raw: &str) -> String {
    let digits = digits(raw, 11);
    match digits.len() {
        0..=2 => digits,
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Progressive CPF mask, `123.456.789-01` when complete.
pub fn format_cpf(raw: &str) -> String {
    let digits = digits(raw, 11);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// Progressive RG mask, `12.345.678-9` when complete.
pub fn format_rg(raw: &str) -> String {
    let digits = digits(raw, 9);
    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("{}.{}", &digits[..2], &digits[2..]),
        6..=8 => format!("{}.{}.{}", &digits[..2], &digits[2..5], &digits[5..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..]
        ),
    }
}

/// Progressive `dd/mm/yyyy` mask for date fields, capped at 8 digits.
pub fn format_date_input(raw: &str) -> String {
    let digits = digits(raw, 8);
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Renders an amount as BRL: `R$ 1.234,56`, thousands separated by dots,
/// cents after a comma, minus sign ahead of the symbol.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents}")
}

/// Parses Brazilian decimal-comma text: dots are thousands separators
/// and are stripped, the comma is the decimal mark. Returns `None` for
/// text with no parseable number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// A `dd/mm/yyyy` form date after the range-only check: day within
/// 1..=31 and month within 1..=12, without calendar awareness. `31/02`
/// passes here and is only refused by [`PlainDate::to_naive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl PlainDate {
    /// `None` when the day does not exist in the month.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Midnight UTC of the date, the canonical stored instant.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        self.to_naive()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Strict `dd/mm/yyyy` parse with the range-only field check.
pub fn parse_date(raw: &str) -> Option<PlainDate> {
    let caps = DATE_RE.captures(raw)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    ((1..=31).contains(&day) && (1..=12).contains(&month)).then_some(PlainDate {
        day,
        month,
        year,
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_date_utc(moment: DateTime<Utc>) -> String {
    moment.format("%d/%m/%Y").to_string()
}
