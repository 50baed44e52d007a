//! Central UI style constants and helpers.

use crate::model::ExperienceLevel;

pub const COLOR_BEGINNER: u32 = 0x2ECC71; // Green
pub const COLOR_INTERMEDIATE: u32 = 0x3498DB; // Blue
pub const COLOR_ADVANCED: u32 = 0x9B59B6; // Purple
pub const COLOR_EXPERT: u32 = 0xF1C40F; // Gold
pub const COLOR_NEUTRAL: u32 = 0x95A5A6; // Grey, for anything unclassified

/// Embed accent color for an experience label. Unknown labels get the neutral
/// entry; the typed lookup below is total.
pub fn experience_color(label: &str) -> u32 {
    match ExperienceLevel::parse(label) {
        Some(level) => color_for(level),
        None => COLOR_NEUTRAL,
    }
}

pub fn color_for(level: ExperienceLevel) -> u32 {
    match level {
        ExperienceLevel::Beginner => COLOR_BEGINNER,
        ExperienceLevel::Intermediate => COLOR_INTERMEDIATE,
        ExperienceLevel::Advanced => COLOR_ADVANCED,
        ExperienceLevel::Expert => COLOR_EXPERT,
    }
}

pub fn emoji_for(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Beginner => "🌱",
        ExperienceLevel::Intermediate => "🌿",
        ExperienceLevel::Advanced => "🌳",
        ExperienceLevel::Expert => "🏆",
    }
}
