use glowguide_core::domain::profile::{HairType, Profile, SkinType};

/// Builds the dermatologist-assistant prompt for a profile. Purely a string
/// transformation; the same profile always yields the same prompt.
pub fn build_analysis_prompt(profile: &Profile) -> String {
    let bmi = profile.bmi();
    let hints = concern_hints(profile);

    let age = profile.age.map(|value| value.to_string()).unwrap_or_else(|| "n/a".to_string());
    let gender =
        profile.gender.map(|value| value.as_str().to_string()).unwrap_or_else(|| "n/a".to_string());
    let weight =
        profile.weight_kg.map(|value| value.to_string()).unwrap_or_else(|| "n/a".to_string());
    let height =
        profile.height_cm.map(|value| value.to_string()).unwrap_or_else(|| "n/a".to_string());
    let bmi_line = bmi.map(|value| value.to_string()).unwrap_or_else(|| "n/a".to_string());
    let blood_group = profile.blood_group.as_deref().unwrap_or("n/a");

    let hair_line = match profile.hair_type {
        Some(hair) => format!("yes, type: {hair}"),
        None => "no".to_string(),
    };

    format!(
        "You are a dermatologist assistant. Analyze the provided details and image if present \
         and respond in concise bullet points suitable for a layperson in India.\n\
         User details:\n\
         - Skin type: {skin}\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Weight(kg): {weight}\n\
         - Height(cm): {height}\n\
         - BMI: {bmi_line}\n\
         - Blood group: {blood_group}\n\
         - Hair interest: {hair_line}\n\
         Potential concerns to check: {hints}.\n\
         If the image shows warning signs (bleeding moles, rapid spreading rashes, severe \
         infections), clearly advise to see a dermatologist.\n\
         Return sections: 1) Likely causes 2) Precautions 3) Lifestyle 4) When to seek care.",
        skin = profile.skin_type,
    )
}

fn concern_hints(profile: &Profile) -> String {
    let mut hints: Vec<&str> = Vec::new();

    if profile.skin_type == SkinType::Oily {
        hints.push("acne, blackheads");
    }
    if profile.skin_type == SkinType::Dry {
        hints.push("dryness, flakiness");
    }
    if profile.hair_type == Some(HairType::Dandruff) {
        hints.push("dandruff");
    }
    if profile.hair_type == Some(HairType::Hairfall) {
        hints.push("hairfall");
    }

    if hints.is_empty() {
        "general skin health".to_string()
    } else {
        hints.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use glowguide_core::domain::profile::{HairType, Profile, SkinType};

    use super::build_analysis_prompt;

    #[test]
    fn prompt_lists_profile_details_and_hints() {
        let mut profile = Profile::new(SkinType::Oily, Decimal::from(800u32));
        profile.age = Some(28);
        profile.weight_kg = Some(70.0);
        profile.height_cm = Some(175.0);
        profile.hair_type = Some(HairType::Dandruff);

        let prompt = build_analysis_prompt(&profile);

        assert!(prompt.contains("- Skin type: oily"));
        assert!(prompt.contains("- BMI: 22.9"));
        assert!(prompt.contains("- Hair interest: yes, type: dandruff"));
        assert!(prompt.contains("Potential concerns to check: acne, blackheads, dandruff."));
    }

    #[test]
    fn missing_fields_render_as_not_available() {
        let profile = Profile::new(SkinType::Sensitive, Decimal::from(500u32));

        let prompt = build_analysis_prompt(&profile);

        assert!(prompt.contains("- Age: n/a"));
        assert!(prompt.contains("- BMI: n/a"));
        assert!(prompt.contains("- Hair interest: no"));
        assert!(prompt.contains("Potential concerns to check: general skin health."));
    }
}
