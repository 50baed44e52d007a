//! The introduction modal: a fixed five-field form, optionally pre-filled
//! from an existing profile. Construction is pure; extraction turns a modal
//! submission back into [`RawIntroFields`].

use crate::interactions::ids::INTRO_MODAL_ID;
use crate::model::{IntroData, RawIntroFields, NOT_PROVIDED, NOT_SPECIFIED};
use serenity::builder::{CreateActionRow, CreateInputText, CreateModal};
use serenity::model::application::{ActionRowComponent, InputTextStyle, ModalInteraction};

pub const INPUT_NAME: &str = "intro_name";
pub const INPUT_ROLE: &str = "intro_role";
pub const INPUT_INSTITUTION: &str = "intro_institution";
pub const INPUT_INTERESTS: &str = "intro_interests";
pub const INPUT_DETAILS: &str = "intro_details";

/// Build the modal, pre-filling from `existing` when updating. Sentinel
/// values are not echoed back into the form.
pub fn create_intro_modal(existing: Option<&IntroData>) -> CreateModal {
    fn prefill(value: Option<&str>) -> Option<&str> {
        value.filter(|v| *v != NOT_PROVIDED && *v != NOT_SPECIFIED)
    }

    let input = |style, label: &str, id: &str, placeholder: &str, value: Option<&str>| {
        let mut text = CreateInputText::new(style, label, id)
            .placeholder(placeholder)
            .required(false);
        if let Some(value) = value {
            text = text.value(value);
        }
        CreateActionRow::InputText(text)
    };

    CreateModal::new(INTRO_MODAL_ID, "Introduce Yourself").components(vec![
        input(
            InputTextStyle::Short,
            "Name",
            INPUT_NAME,
            "How should we call you?",
            prefill(existing.map(|e| e.name.as_str())),
        ),
        input(
            InputTextStyle::Short,
            "Role / Study",
            INPUT_ROLE,
            "e.g. ML engineer, CS student",
            prefill(existing.map(|e| e.role.as_str())),
        ),
        input(
            InputTextStyle::Short,
            "Institution",
            INPUT_INSTITUTION,
            "Company, university, lab...",
            prefill(existing.map(|e| e.institution.as_str())),
        ),
        input(
            InputTextStyle::Paragraph,
            "Interests",
            INPUT_INTERESTS,
            "AI fields or tools you care about",
            prefill(existing.map(|e| e.interests.as_str())),
        ),
        input(
            InputTextStyle::Paragraph,
            "Anything else?",
            INPUT_DETAILS,
            "Projects, goals, fun facts",
            prefill(existing.map(|e| e.details.as_str())),
        ),
    ])
}

/// Collect the text-input values from a modal submission by custom id.
/// Unknown components are ignored.
pub fn extract_fields(modal: &ModalInteraction) -> RawIntroFields {
    let mut raw = RawIntroFields::default();
    for row in &modal.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(text) = component {
                let value = text.value.clone();
                match text.custom_id.as_str() {
                    INPUT_NAME => raw.name = value,
                    INPUT_ROLE => raw.role = value,
                    INPUT_INSTITUTION => raw.institution = value,
                    INPUT_INTERESTS => raw.interests = value,
                    INPUT_DETAILS => raw.details = value,
                    _ => {}
                }
            }
        }
    }
    raw
}
