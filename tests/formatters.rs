#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use smart_nippo::libs::error::{exit_code, NippoError};
    use smart_nippo::libs::formatter::{format_date, format_minutes, preview};

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(540), "09:00");
        assert_eq!(format_minutes(1440), "24:00");
        assert_eq!(format_minutes(6005), "100:05");
        assert_eq!(format_minutes(-30), "00:00");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date, "%Y/%m/%d"), "2024/01/05");
        assert_eq!(format_date(date, "%d.%m"), "05.01");
        assert_eq!(format_date(date, ""), "2024-01-05");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("first line\nsecond", 20), "first line…");
        assert_eq!(preview("設計レビューと修正対応", 5), "設計レビ…");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(NippoError::RequiredFieldMissing { field: "content".to_string() }.exit_code(), exit_code::INPUT);
        assert_eq!(NippoError::ReportNotFound(1).exit_code(), exit_code::GENERAL);
        assert_eq!(NippoError::CorruptRecord("x".to_string()).exit_code(), exit_code::DATABASE);
        assert_eq!(
            NippoError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).exit_code(),
            exit_code::FILE_IO
        );
        assert!(NippoError::UnsupportedFormat("xlsx".to_string()).is_validation());
        assert!(!NippoError::Cancelled.is_validation());
    }
}
