use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Date layout used by date cells and the date editor.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// A typed cell value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interprets the value as a date: `Date` as-is, `Text` parsed with [`DATE_FORMAT`].
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

/// Display formatting applied to a column's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Formatter {
    /// `%Y/%m/%d`; text that does not parse as a date is shown unchanged.
    Date,
    /// Thousands-separated number, e.g. `120,000`.
    Money,
}

impl Formatter {
    pub fn format(self, value: &CellValue) -> String {
        match self {
            Formatter::Date => match value.as_date() {
                Some(d) => d.format(DATE_FORMAT).to_string(),
                None => value.to_string(),
            },
            Formatter::Money => match value.as_number() {
                Some(n) => format_money(n),
                None => value.to_string(),
            },
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn format_money(n: f64) -> String {
    let s = format_number(n);
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// One grid row: column key to value. Missing keys read as [`CellValue::Empty`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.fields.get(key).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(Formatter::Money.format(&CellValue::Number(120000.0)), "120,000");
        assert_eq!(Formatter::Money.format(&CellValue::Number(9000.0)), "9,000");
        assert_eq!(Formatter::Money.format(&CellValue::Number(-1234567.5)), "-1,234,567.5");
        assert_eq!(Formatter::Money.format(&CellValue::Number(0.0)), "0");
        assert_eq!(Formatter::Money.format(&CellValue::text("n/a")), "n/a");
    }

    #[test]
    fn date_formatter_accepts_text_and_dates() {
        let d = NaiveDate::from_ymd_opt(2017, 12, 5).unwrap();
        assert_eq!(Formatter::Date.format(&CellValue::Date(d)), "2017/12/05");
        assert_eq!(Formatter::Date.format(&CellValue::text("2018/01/01")), "2018/01/01");
        assert_eq!(Formatter::Date.format(&CellValue::text("")), "");
    }

    #[test]
    fn missing_field_reads_empty() {
        let row = Row::new().with("id", 1i64);
        assert_eq!(row.get("id"), &CellValue::Number(1.0));
        assert_eq!(row.get("title"), &CellValue::Empty);
        assert_eq!(row.get("id").to_string(), "1");
    }
}
