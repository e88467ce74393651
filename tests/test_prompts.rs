//! Tests for the persona prompt under config/prompts

use std::fs;

use thani_bot::persona::{self, prompt::persona_prompt};

#[test]
fn test_persona_prompt_file_exists() {
    assert!(fs::metadata("config/prompts/persona.md").is_ok(), "persona.md prompt file missing");
}

#[test]
fn test_persona_prompt_template_vars() {
    let text = fs::read_to_string("config/prompts/persona.md").unwrap();
    assert!(text.contains("{{name}}"), "persona.md should contain {{name}} variable");
}

#[test]
fn test_persona_prompt_mentions_identity_phrase() {
    let text = fs::read_to_string("config/prompts/persona.md").unwrap();
    assert!(text.contains(persona::IDENTITY_PHRASE));
}

#[test]
fn test_default_config_points_at_persona_file() {
    let cfg = thani_bot::config::load_from(std::path::Path::new("config/default.toml"), None, None).unwrap();
    let prompt = persona_prompt(&cfg.persona.prompts_dir, &cfg.persona.persona_file);
    assert!(prompt.starts_with("You are **Thani Thankan**"));
}
