//! 日期转换模块
//!
//! 账单日期可能是 ISO 格式（`2004-04-04`），也可能是
//! [`crate::format::format_date`] 生成的法语显示格式（`4 Avr. 04`、
//! `1 Janv. 2020`）。本模块将两者都转换为 [`NaiveDate`]。

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::cmp::Reverse;
use std::fmt;

/// 法语月份缩写及其月份序号
///
/// 同时包含长缩写（`Janv.`）和三字母显示形式（`Jan.`）。
/// `Jui.` 有歧义，按六月处理。
const FRENCH_MONTHS: &[(&str, u32)] = &[
    ("Janv.", 1),
    ("Jan.", 1),
    ("Févr.", 2),
    ("Fév.", 2),
    ("Mars", 3),
    ("Mar.", 3),
    ("Avr.", 4),
    ("Mai", 5),
    ("Mai.", 5),
    ("Juin", 6),
    ("Jui.", 6),
    ("Juil.", 7),
    ("Aoû.", 8),
    ("Août", 8),
    ("Sept.", 9),
    ("Sep.", 9),
    ("Oct.", 10),
    ("Nov.", 11),
    ("Déc.", 12),
];

const ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// 输入不是字符串
    NotAString(String),
    /// 输入无法拆分为日、月、年
    BadFormat(String),
    UnknownMonth(String),
    /// 各部分可解析但不构成有效日期
    OutOfRange(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::NotAString(v) => write!(f, "convert_date: parameter is not a string: {}", v),
            DateError::BadFormat(v) => write!(
                f,
                "convert_date: parameter does not match the required date format: {}",
                v
            ),
            DateError::UnknownMonth(v) => write!(f, "convert_date: unknown month: {}", v),
            DateError::OutOfRange(v) => write!(f, "convert_date: date out of range: {}", v),
        }
    }
}

impl std::error::Error for DateError {}

fn month_number(month: &str) -> Option<u32> {
    if let Some((_, n)) = FRENCH_MONTHS.iter().find(|(name, _)| *name == month) {
        return Some(*n);
    }
    if let Ok(n) = month.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lower = month.trim_end_matches('.').to_lowercase();
    let prefix: String = lower.chars().take(3).collect();
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

/// 将 `YYYY-MM-DD` 或 `D Month YYYY`（法语或英语月份）转换为日期
///
/// 两位数年份按 20xx 处理。
pub fn convert_date(input: &str) -> Result<NaiveDate, DateError> {
    let parts: Vec<&str> = if input.contains('-') {
        input.split('-').collect()
    } else {
        input.split_whitespace().collect()
    };

    let (day, month, year) = match parts.as_slice() {
        [first, month, last, ..] if first.chars().count() > 2 => (*last, *month, *first),
        [day, month, year, ..] => (*day, *month, *year),
        _ => return Err(DateError::BadFormat(input.to_string())),
    };
    if day.is_empty() || month.is_empty() || year.is_empty() {
        return Err(DateError::BadFormat(input.to_string()));
    }

    let month = month_number(month).ok_or_else(|| DateError::UnknownMonth(month.to_string()))?;
    let day: u32 = day
        .parse()
        .map_err(|_| DateError::BadFormat(input.to_string()))?;
    let mut year: i32 = year
        .parse()
        .map_err(|_| DateError::BadFormat(input.to_string()))?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

/// 与 [`convert_date`] 相同，用于直接来自 JSON 的值
pub fn convert_json_date(value: &Value) -> Result<NaiveDate, DateError> {
    match value {
        Value::String(s) => convert_date(s),
        other => Err(DateError::NotAString(other.to_string())),
    }
}

/// 用于对后端原始日期排序的宽松解析
///
/// 接受 ISO 日期、RFC 3339 时间戳以及 [`convert_date`] 能识别的格式。
pub fn parse_bill_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = input.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    convert_date(input).ok()
}

/// 通过 [`convert_date`] 按日期倒序排列
///
/// 排序前先转换全部日期，遇到第一个格式错误的条目即返回错误，
/// 且 `items` 保持不变。
pub fn sort_by_date<T, F>(items: &mut Vec<T>, key: F) -> Result<(), DateError>
where
    F: Fn(&T) -> &str,
{
    let keys = items
        .iter()
        .map(|item| convert_date(key(item)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut keyed: Vec<(NaiveDate, T)> = keys.into_iter().zip(items.drain(..)).collect();
    keyed.sort_by_key(|(date, _)| Reverse(*date));
    items.extend(keyed.into_iter().map(|(_, item)| item));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_french_and_iso_forms_agree() {
        assert_eq!(convert_date("1 Janv. 2020").unwrap(), ymd(2020, 1, 1));
        assert_eq!(convert_date("2020-01-01").unwrap(), ymd(2020, 1, 1));
        assert_eq!(
            convert_date("1 Janv. 2020").unwrap(),
            convert_date("2020-01-01").unwrap()
        );
    }

    #[test]
    fn test_display_form_with_two_digit_year() {
        assert_eq!(convert_date("4 Avr. 04").unwrap(), ymd(2004, 4, 4));
        assert_eq!(convert_date("12 Déc. 21").unwrap(), ymd(2021, 12, 12));
        assert_eq!(convert_date("3 Fév. 03").unwrap(), ymd(2003, 2, 3));
    }

    #[test]
    fn test_english_month_names() {
        assert_eq!(convert_date("15 Mar 2019").unwrap(), ymd(2019, 3, 15));
        assert_eq!(convert_date("15 September 2019").unwrap(), ymd(2019, 9, 15));
    }

    #[test]
    fn test_non_string_input_is_rejected() {
        let err = convert_json_date(&serde_json::json!(20200101)).unwrap_err();
        assert!(matches!(err, DateError::NotAString(_)));
        assert!(convert_json_date(&Value::Null).is_err());
        assert_eq!(
            convert_json_date(&serde_json::json!("2020-01-01")).unwrap(),
            ymd(2020, 1, 1)
        );
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(convert_date(""), Err(DateError::BadFormat(_))));
        assert!(matches!(convert_date("2020-01"), Err(DateError::BadFormat(_))));
        assert!(matches!(convert_date("1 Foo. 2020"), Err(DateError::UnknownMonth(_))));
        assert!(matches!(convert_date("2020-02-31"), Err(DateError::OutOfRange(_))));
    }

    #[test]
    fn test_parse_bill_date_accepts_timestamps() {
        assert_eq!(parse_bill_date("2004-04-04"), Some(ymd(2004, 4, 4)));
        assert_eq!(
            parse_bill_date("2004-04-04T10:00:00+00:00"),
            Some(ymd(2004, 4, 4))
        );
        assert_eq!(parse_bill_date("not a date"), None);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut dates = vec!["2001-01-01", "4 Avr. 04", "2003-03-03", "2002-02-02"];
        sort_by_date(&mut dates, |d| *d).unwrap();
        assert_eq!(dates, vec!["4 Avr. 04", "2003-03-03", "2002-02-02", "2001-01-01"]);
    }

    #[test]
    fn test_sort_by_date_aborts_on_malformed_entry() {
        let mut dates = vec!["2001-01-01", "garbage", "2003-03-03"];
        let err = sort_by_date(&mut dates, |d| *d).unwrap_err();
        assert!(matches!(err, DateError::BadFormat(_)));
        assert_eq!(dates, vec!["2001-01-01", "garbage", "2003-03-03"]);
    }
}
