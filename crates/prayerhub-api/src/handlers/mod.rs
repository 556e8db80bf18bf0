//! HTTP request handlers, one module per route group.

pub mod admin;
pub mod health;
pub mod registration;
pub mod slot;
pub mod user;

use chrono::NaiveDate;

use prayerhub_core::error::AppError;

/// Parse a `YYYY-MM-DD` query value.
pub(crate) fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("날짜 정보가 필요합니다."))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation("올바른 날짜 형식이 아닙니다. (YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2025-09-08")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 8).unwrap()
        );
        assert!(parse_date(None).is_err());
        assert!(parse_date(Some("")).is_err());
        assert!(parse_date(Some("2025/09/08")).is_err());
    }
}
