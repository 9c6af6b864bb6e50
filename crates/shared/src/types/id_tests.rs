use super::*;
use std::str::FromStr;

#[test]
fn test_typed_id_roundtrips_raw_key() {
    let id = CompanyId::new(42);
    assert_eq!(id.into_inner(), 42);
    assert_eq!(CompanyId::from(42), id);
}

#[test]
fn test_typed_id_display() {
    assert_eq!(ReportPeriodId::new(7).to_string(), "7");
}

#[test]
fn test_typed_id_from_str() {
    assert_eq!(CategoryId::from_str("15").unwrap(), CategoryId::new(15));
    assert!(CategoryId::from_str("abc").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let json = serde_json::to_string(&CompanyId::new(3)).unwrap();
    assert_eq!(json, "3");

    let parsed: CompanyId = serde_json::from_str("9").unwrap();
    assert_eq!(parsed, CompanyId::new(9));
}
