//! 账单行的显示格式化

use chrono::Datelike;

use crate::BillStatus;
use crate::date::{DateError, parse_bill_date};

/// 账单表格中显示的三字母法语月份
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// 将原始账单日期格式化为 `4 Avr. 04`
pub fn format_date(raw: &str) -> Result<String, DateError> {
    let date = parse_bill_date(raw).ok_or_else(|| DateError::BadFormat(raw.to_string()))?;
    let month = MONTH_LABELS[date.month0() as usize];
    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        month,
        date.year().rem_euclid(100)
    ))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refused",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::convert_date;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2021-12-25").unwrap(), "25 Déc. 21");
        assert_eq!(format_date("2001-01-01").unwrap(), "1 Jan. 01");
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        assert!(format_date("").is_err());
        assert!(format_date("yesterday").is_err());
    }

    #[test]
    fn test_formatted_date_converts_back() {
        for raw in ["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01", "2019-11-30"] {
            let shown = format_date(raw).unwrap();
            assert_eq!(convert_date(&shown).unwrap(), convert_date(raw).unwrap(), "{shown}");
        }
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(BillStatus::Pending), "En attente");
        assert_eq!(format_status(BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(BillStatus::Refused), "Refused");
    }
}
