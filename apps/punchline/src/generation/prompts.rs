// All LLM prompt text for routine generation.
// Reuses the shared format instruction from llm_client::prompts.

use crate::llm_client::prompts::SCHEMA_FORMAT_INSTRUCTION;
use crate::models::UserProfile;

/// Echoed in place of the influence list when the user picked nobody.
pub const NO_INFLUENCES: &str = "None specified";

/// Routine prompt template.
/// Replace: {name}, {age}, {occupation}, {hometown}, {style}, {topics}, {context},
///          {influences}, {format_instruction}
pub const ROUTINE_PROMPT_TEMPLATE: &str = r#"ROLE: You are "The Mic Master", a legendary stand-up comedy coach and head writer who has shaped the careers of the biggest names in comedy. You understand rhythm, timing, misdirection, rule of three, and the importance of a strong persona.

BACKGROUND: The user is a new comic looking for material. They have provided details about their life. Your job is to mine their life for comedy gold.

USER CONTEXT:
Name: {name}
Age: {age}
Occupation: {occupation}
Hometown: {hometown}
Comedic Style: {style}
Topics/Themes: {topics}
Life Context/Bio: {context}
INSPIRATIONAL INFLUENCES: {influences}

TASK: Write a cohesive "tight 10" (10 specific bits) stand-up comedy routine customized to this user's persona and inputs.

REQUIREMENTS:
1. Voice: The jokes must match the requested style ({style}). If influences are listed, channel their delivery cadence and perspective (e.g., if Bill Burr is selected, allow for some ranting/cynicism; if Mitch Hedberg, use one-liners and surrealism).
2. Structure: Generate exactly 10 distinct bits, with ids 1 through 10.
3. Cohesion: The bits should flow logically, using call-backs where appropriate.
4. Coaching: For each bit, provide a "Coaching Tip" explaining why it works or how to deliver it (e.g., "Pause here," "Do an accent," "Speed up").
5. Opener/Closer: Provide a quick one-liner opener to establish the room and a strong closer to leave them laughing.

{format_instruction}"#;

/// Renders the routine prompt for a profile. Every field is echoed verbatim.
pub fn render_routine_prompt(profile: &UserProfile) -> String {
    let influences = profile
        .influences_joined()
        .unwrap_or_else(|| NO_INFLUENCES.to_string());

    fill_template(
        ROUTINE_PROMPT_TEMPLATE,
        &[
            ("name", profile.name.as_str()),
            ("age", profile.age.as_str()),
            ("occupation", profile.occupation.as_str()),
            ("hometown", profile.hometown.as_str()),
            ("style", profile.style.label()),
            ("topics", profile.topics.as_str()),
            ("context", profile.context.as_str()),
            ("influences", influences.as_str()),
            ("format_instruction", SCHEMA_FORMAT_INSTRUCTION),
        ],
    )
}

/// Single-pass `{key}` substitution. Substituted values are never re-scanned, so user
/// text containing braces comes through untouched. Unknown placeholders are left as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComedyStyle;

    fn sample_profile() -> UserProfile {
        UserProfile {
            name: "Chad GPT".to_string(),
            age: "29".to_string(),
            occupation: "Product Manager".to_string(),
            hometown: "San Francisco, CA".to_string(),
            topics: "Tech culture, rent prices".to_string(),
            context: "I live with 4 roommates.".to_string(),
            style: ComedyStyle::Dark,
            influences: vec![],
        }
    }

    #[test]
    fn test_prompt_contains_every_scalar_field() {
        let profile = sample_profile();
        let prompt = render_routine_prompt(&profile);
        for value in [
            &profile.name,
            &profile.age,
            &profile.occupation,
            &profile.hometown,
            &profile.topics,
            &profile.context,
        ] {
            assert!(prompt.contains(value.as_str()), "prompt missing '{value}'");
        }
        assert!(prompt.contains("Comedic Style: Dark/Edgy"));
        assert!(prompt.contains("requested style (Dark/Edgy)"));
    }

    #[test]
    fn test_empty_influences_fall_back() {
        let prompt = render_routine_prompt(&sample_profile());
        assert!(prompt.contains("INSPIRATIONAL INFLUENCES: None specified"));
    }

    #[test]
    fn test_influences_are_comma_joined() {
        let mut profile = sample_profile();
        profile.influences = vec!["Bill Burr".to_string(), "Mitch Hedberg".to_string()];
        let prompt = render_routine_prompt(&profile);
        assert!(prompt.contains("Bill Burr, Mitch Hedberg"));
        assert!(!prompt.contains(NO_INFLUENCES));
    }

    #[test]
    fn test_prompt_asks_for_ten_bits_and_schema_output() {
        let prompt = render_routine_prompt(&sample_profile());
        assert!(prompt.contains("exactly 10 distinct bits"));
        assert!(prompt.contains("The Mic Master"));
        assert!(prompt.trim_end().ends_with(SCHEMA_FORMAT_INSTRUCTION));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let profile = sample_profile();
        assert_eq!(render_routine_prompt(&profile), render_routine_prompt(&profile));
    }

    #[test]
    fn test_user_text_with_placeholders_is_echoed_verbatim() {
        let mut profile = sample_profile();
        profile.context = "My password is {age} and I like {curly} braces".to_string();
        let prompt = render_routine_prompt(&profile);
        assert!(prompt.contains("My password is {age} and I like {curly} braces"));
    }

    #[test]
    fn test_fill_template_leaves_unknown_and_unclosed_braces() {
        let out = fill_template("a {x} {y} {", &[("x", "1")]);
        assert_eq!(out, "a 1 {y} {");
    }
}
