use super::*;

#[test]
fn all_codes_are_sorted_and_unique() {
    for pair in ErrorCode::ALL.windows(2) {
        assert!(pair[0] < pair[1], "{} before {}", pair[0], pair[1]);
        assert!(pair[0].as_str() < pair[1].as_str());
    }
}

#[test]
fn parse_round_trips_through_display() {
    for &code in ErrorCode::ALL {
        assert_eq!(code.to_string().parse::<ErrorCode>(), Ok(code));
    }
    assert_eq!("e2003".parse::<ErrorCode>(), Ok(ErrorCode::E2003));
}

#[test]
fn unknown_code_is_rejected() {
    let err = "E7777".parse::<ErrorCode>();
    assert_eq!(err, Err(UnknownErrorCode("E7777".to_string())));
}

#[test]
fn stage_predicates() {
    assert!(ErrorCode::E0002.is_config_error());
    assert!(ErrorCode::E2005.is_translation_error());
    assert!(ErrorCode::E3002.is_name_error());
    assert!(!ErrorCode::E4001.is_name_error());
}

#[test]
fn every_code_has_a_description() {
    for &code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code}");
    }
}
