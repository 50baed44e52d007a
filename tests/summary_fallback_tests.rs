use introbot::model::{ExperienceLevel, IntroData, RawIntroFields};
use introbot::services::summarizer::fallback_summary;
use introbot::ui::style;

fn intro(role: Option<&str>, details: Option<&str>) -> IntroData {
    IntroData::from_raw(RawIntroFields {
        name: Some("Ana".to_string()),
        role: role.map(String::from),
        institution: None,
        interests: Some("NLP, RL".to_string()),
        details: details.map(String::from),
    })
    .expect("valid intro")
}

#[test]
fn fallback_is_deterministic() {
    let data = intro(Some("ML engineer"), Some("builds agents"));
    assert_eq!(fallback_summary(&data), fallback_summary(&data));
}

#[test]
fn fallback_mentions_name_and_skips_sentinels() {
    let summary = fallback_summary(&intro(None, None));
    assert!(summary.summary.contains("Ana"));
    assert!(!summary.summary.contains("Not provided"));
    assert!(!summary.summary.contains("Not specified"));
    assert_eq!(summary.skills, "NLP, RL");
}

#[test]
fn fallback_classifies_from_role_keywords() {
    assert_eq!(
        fallback_summary(&intro(Some("Professor of CS"), None)).experience_level,
        ExperienceLevel::Expert
    );
    assert_eq!(
        fallback_summary(&intro(Some("Senior researcher"), None)).experience_level,
        ExperienceLevel::Advanced
    );
    assert_eq!(
        fallback_summary(&intro(Some("Software developer"), None)).experience_level,
        ExperienceLevel::Intermediate
    );
    assert_eq!(
        fallback_summary(&intro(None, None)).experience_level,
        ExperienceLevel::Beginner
    );
}

#[test]
fn experience_labels_round_trip() {
    for level in ExperienceLevel::ALL {
        assert_eq!(ExperienceLevel::parse(level.label()), Some(level));
        assert_eq!(ExperienceLevel::parse(&level.label().to_uppercase()), Some(level));
    }
    assert_eq!(ExperienceLevel::parse("Wizard"), None);
}

#[test]
fn unknown_experience_label_gets_neutral_color() {
    assert_eq!(style::experience_color("Wizard"), style::COLOR_NEUTRAL);
    for level in ExperienceLevel::ALL {
        assert_ne!(style::experience_color(level.label()), style::COLOR_NEUTRAL);
        assert_eq!(style::experience_color(level.label()), style::color_for(level));
    }
}
