use std::str::FromStr;
use zonegate_domain::RecordType;

#[test]
fn test_wire_codes_roundtrip_for_implemented_types() {
    for rt in RecordType::IMPLEMENTED {
        assert_eq!(RecordType::from_u16(rt.to_u16()), rt);
        assert!(rt.is_implemented());
    }
}

#[test]
fn test_unknown_code_is_unimplemented() {
    let soa = RecordType::from_u16(6);

    assert_eq!(soa, RecordType::Unimplemented(6));
    assert!(!soa.is_implemented());
    assert_eq!(soa.to_u16(), 6);
    assert_eq!(soa.to_string(), "TYPE6");
}

#[test]
fn test_list_types() {
    assert!(RecordType::MX.is_list());
    assert!(RecordType::NS.is_list());
    assert!(RecordType::TXT.is_list());
    assert!(RecordType::SRV.is_list());

    assert!(!RecordType::A.is_list());
    assert!(!RecordType::AAAA.is_list());
    assert!(!RecordType::CNAME.is_list());
    assert!(!RecordType::PTR.is_list());
}

#[test]
fn test_from_str_is_case_insensitive() {
    assert_eq!(RecordType::from_str("aaaa").unwrap(), RecordType::AAAA);
    assert_eq!(RecordType::from_str("Srv").unwrap(), RecordType::SRV);
    assert_eq!(
        RecordType::from_str("TYPE257").unwrap(),
        RecordType::Unimplemented(257)
    );
    assert!(RecordType::from_str("BOGUS").is_err());
}
