use introbot::interactions::ids::IntroAction;
use serenity::model::id::UserId;

#[test]
fn round_trips_every_action() {
    let owner = UserId::new(637126486423371778);
    let actions = [
        IntroAction::Open,
        IntroAction::Update(owner),
        IntroAction::Delete(owner),
        IntroAction::ConfirmDelete(owner),
        IntroAction::CancelDelete(owner),
    ];
    for action in actions {
        let id = action.custom_id();
        assert_eq!(IntroAction::parse(&id), Some(action), "failed for `{id}`");
    }
}

#[test]
fn delete_prefix_does_not_swallow_confirm_and_cancel() {
    // `intro_delete_` is a prefix of both; the parser must disambiguate.
    assert_eq!(
        IntroAction::parse("intro_delete_confirm_42"),
        Some(IntroAction::ConfirmDelete(UserId::new(42)))
    );
    assert_eq!(
        IntroAction::parse("intro_delete_cancel_42"),
        Some(IntroAction::CancelDelete(UserId::new(42)))
    );
    assert_eq!(
        IntroAction::parse("intro_delete_42"),
        Some(IntroAction::Delete(UserId::new(42)))
    );
}

#[test]
fn rejects_malformed_ids() {
    assert_eq!(IntroAction::parse("intro_update_"), None);
    assert_eq!(IntroAction::parse("intro_update_abc"), None);
    assert_eq!(IntroAction::parse("intro_update_0"), None);
    assert_eq!(IntroAction::parse("saga_map"), None);
    assert_eq!(IntroAction::parse("intro"), None);
}

#[test]
fn owner_id_is_encoded_in_profile_buttons() {
    let owner = UserId::new(99);
    assert!(IntroAction::Update(owner).custom_id().ends_with("_99"));
    assert!(IntroAction::Delete(owner).custom_id().ends_with("_99"));
}
