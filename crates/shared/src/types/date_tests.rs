use super::*;
use rstest::rstest;

#[test]
fn test_parse_valid_date() {
    let date = ReportDate::parse("2023-01-31").unwrap();
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
    assert_eq!(date.to_string(), "2023-01-31");
}

#[rstest]
#[case("01-01-2023")]
#[case("2023-1-1")]
#[case("2023/01/01")]
#[case("2023-01-01T00:00:00")]
#[case(" 2023-01-01")]
#[case("")]
#[case("2023-02-30")]
#[case("2023-13-01")]
fn test_parse_rejects_malformed(#[case] input: &str) {
    let err = ReportDate::parse(input).unwrap_err();
    assert_eq!(err.value, input);
}

#[test]
fn test_error_message_names_expected_format() {
    let err = ReportDate::parse("01-01-2023").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid date '01-01-2023': expected YYYY-MM-DD"
    );
}

#[test]
fn test_serde_uses_string_form() {
    let date: ReportDate = serde_json::from_str("\"2024-06-30\"").unwrap();
    assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-06-30\"");
    assert!(serde_json::from_str::<ReportDate>("\"30-06-2024\"").is_err());
}
