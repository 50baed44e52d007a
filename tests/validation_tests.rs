use introbot::model::{IntroData, RawIntroFields, NOT_PROVIDED, NOT_SPECIFIED};

fn raw(name: Option<&str>, interests: Option<&str>) -> RawIntroFields {
    RawIntroFields {
        name: name.map(String::from),
        interests: interests.map(String::from),
        ..Default::default()
    }
}

#[test]
fn blank_optional_fields_get_sentinels() {
    let intro = IntroData::from_raw(raw(Some("Ana"), Some("NLP, RL"))).expect("valid");
    assert_eq!(intro.name, "Ana");
    assert_eq!(intro.interests, "NLP, RL");
    assert_eq!(intro.role, NOT_PROVIDED);
    assert_eq!(intro.institution, NOT_SPECIFIED);
    assert_eq!(intro.details, NOT_PROVIDED);
}

#[test]
fn fields_are_trimmed() {
    let fields = RawIntroFields {
        name: Some("  Ana  ".to_string()),
        role: Some(" ML engineer ".to_string()),
        institution: Some("   ".to_string()),
        interests: Some("  NLP  ".to_string()),
        details: None,
    };
    let intro = IntroData::from_raw(fields).expect("valid");
    assert_eq!(intro.name, "Ana");
    assert_eq!(intro.role, "ML engineer");
    // Whitespace-only collapses to the sentinel.
    assert_eq!(intro.institution, NOT_SPECIFIED);
    assert_eq!(intro.interests, "NLP");
}

#[test]
fn one_char_name_is_rejected() {
    let err = IntroData::from_raw(raw(Some("A"), Some("NLP, RL"))).unwrap_err();
    assert!(err.contains("name"), "unexpected message: {err}");
}

#[test]
fn missing_name_is_rejected() {
    assert!(IntroData::from_raw(raw(None, Some("NLP, RL"))).is_err());
    assert!(IntroData::from_raw(raw(Some("   "), Some("NLP, RL"))).is_err());
}

#[test]
fn short_interests_are_rejected() {
    let err = IntroData::from_raw(raw(Some("Ana"), Some("ai"))).unwrap_err();
    assert!(err.contains("interests"), "unexpected message: {err}");
    assert!(IntroData::from_raw(raw(Some("Ana"), None)).is_err());
}
