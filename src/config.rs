//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit `-f` path), then applies `THANI_LOG_LEVEL` and the model
//! API key from the environment. With no explicit path and no default file,
//! a built-in minimal config is used.

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Env vars consulted for the model API key, in order.
const API_KEY_VARS: &[&str] = &["LLM_API_KEY", "HF_TOKEN", "HUGGINGFACE_HUB_TOKEN"];

/// PTY (console) channel configuration.
#[derive(Debug, Clone)]
pub struct PtyConfig {
    pub enabled: bool,
}

/// HTTP channel configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub enabled: bool,
    /// Socket address to bind the HTTP listener to.
    pub bind: String,
    /// Requests allowed to wait for a routing slot before `queue_full`.
    pub queue_size: usize,
    /// Requests routed at the same time.
    pub max_concurrent: usize,
}

/// Comms subsystem configuration.
#[derive(Debug, Clone)]
pub struct CommsConfig {
    pub pty: PtyConfig,
    pub http: HttpConfig,
}

/// OpenAI-compatible provider configuration, from `[llm.openai]`.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Upper bound on generated tokens; per-request limits are clamped to it.
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"dummy"`, `"disabled"`, `"openai"`).
    /// Named `default` in TOML.
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Persona prompt location.
#[derive(Debug, Clone)]
pub struct PersonaConfig {
    /// Directory holding prompt templates (already `~`-expanded).
    pub prompts_dir: PathBuf,
    /// File inside `prompts_dir` with the system persona.
    pub persona_file: String,
}

/// Response router tuning, from `[router]`.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Past turns included in the model prompt.
    pub history_turns: usize,
    /// Model replies at or below this many characters are rejected.
    pub min_response_chars: usize,
    /// Reject model replies dominated by English.
    pub require_non_english: bool,
    /// English stop-words tolerated when `require_non_english` is set.
    pub max_english_stopwords: usize,
    /// Chance of appending a slang interjection to a fallback phrase.
    pub interjection_probability: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Office-holder overrides, from `[facts.*]`. Keys are place keys such as
/// `usa` or `tamil_nadu`.
#[derive(Debug, Clone, Default)]
pub struct FactsConfig {
    pub presidents: HashMap<String, String>,
    pub prime_ministers: HashMap<String, String>,
    pub chief_ministers: HashMap<String, String>,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    pub persona: PersonaConfig,
    pub router: RouterConfig,
    pub llm: LlmConfig,
    /// API key from the environment, `None` for keyless local models.
    /// Never sourced from TOML.
    pub llm_api_key: Option<String>,
    pub facts: FactsConfig,
    pub comms: CommsConfig,
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    supervisor: RawSupervisor,
    #[serde(default)]
    persona: RawPersona,
    #[serde(default)]
    router: RawRouter,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    facts: RawFacts,
    #[serde(default)]
    comms: RawComms,
}

#[derive(Deserialize)]
struct RawSupervisor {
    #[serde(default = "default_bot_name")]
    bot_name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawSupervisor {
    fn default() -> Self {
        Self { bot_name: default_bot_name(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawPersona {
    #[serde(default = "default_prompts_dir")]
    prompts_dir: String,
    #[serde(default = "default_persona_file")]
    persona_file: String,
}

impl Default for RawPersona {
    fn default() -> Self {
        Self { prompts_dir: default_prompts_dir(), persona_file: default_persona_file() }
    }
}

#[derive(Deserialize)]
struct RawRouter {
    #[serde(default = "default_history_turns")]
    history_turns: usize,
    #[serde(default = "default_min_response_chars")]
    min_response_chars: usize,
    #[serde(default)]
    require_non_english: bool,
    #[serde(default = "default_max_english_stopwords")]
    max_english_stopwords: usize,
    #[serde(default = "default_interjection_probability")]
    interjection_probability: f64,
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for RawRouter {
    fn default() -> Self {
        Self {
            history_turns: default_history_turns(),
            min_response_chars: default_min_response_chars(),
            require_non_english: false,
            max_english_stopwords: default_max_english_stopwords(),
            interjection_probability: default_interjection_probability(),
            seed: None,
        }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_top_p")]
    top_p: f32,
    #[serde(default = "default_openai_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            top_p: default_openai_top_p(),
            max_tokens: default_openai_max_tokens(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

#[derive(Deserialize, Default)]
struct RawFacts {
    #[serde(default)]
    presidents: HashMap<String, String>,
    #[serde(default)]
    prime_ministers: HashMap<String, String>,
    #[serde(default)]
    chief_ministers: HashMap<String, String>,
}

#[derive(Deserialize, Default)]
struct RawComms {
    #[serde(default)]
    pty: RawPty,
    #[serde(default)]
    http: RawHttp,
}

#[derive(Deserialize)]
struct RawPty {
    #[serde(default = "default_true")]
    enabled: bool,
}

impl Default for RawPty {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Deserialize)]
struct RawHttp {
    #[serde(default)]
    enabled: bool,
    #[serde(default = "default_http_bind")]
    bind: String,
    #[serde(default = "default_queue_size")]
    queue_size: usize,
    #[serde(default = "default_max_concurrent")]
    max_concurrent: usize,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self {
            enabled: false,
            bind: default_http_bind(),
            queue_size: default_queue_size(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_bot_name() -> String { "thani-thankan".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_prompts_dir() -> String { "config/prompts".to_string() }
fn default_persona_file() -> String { "persona.md".to_string() }
fn default_history_turns() -> usize { 2 }
fn default_min_response_chars() -> usize { 10 }
fn default_max_english_stopwords() -> usize { 3 }
fn default_interjection_probability() -> f64 { 0.35 }
fn default_llm_provider() -> String { "dummy".to_string() }
fn default_openai_api_base_url() -> String { "http://127.0.0.1:8080/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "google/gemma-3-1b-it".to_string() }
fn default_openai_temperature() -> f32 { 0.8 }
fn default_openai_top_p() -> f32 { 0.9 }
fn default_openai_max_tokens() -> u32 { 512 }
fn default_openai_timeout_seconds() -> u64 { 60 }
fn default_http_bind() -> String { "127.0.0.1:7860".to_string() }
fn default_queue_size() -> usize { 20 }
fn default_max_concurrent() -> usize { 1 }
fn default_true() -> bool { true }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `config_path` or `config/default.toml`, then apply env
/// overrides.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let log_level_override = env::var("THANI_LOG_LEVEL").ok();
    let api_key = API_KEY_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()));

    match config_path {
        Some(path) => load_from(Path::new(path), log_level_override.as_deref(), api_key),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(
            Path::new(DEFAULT_CONFIG_PATH),
            log_level_override.as_deref(),
            api_key,
        ),
        None => Ok(resolve(RawConfig::default(), log_level_override.as_deref(), api_key)),
    }
}

/// Internal loader: accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    api_key: Option<String>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    validate(&parsed).map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    Ok(resolve(parsed, log_level_override, api_key))
}

fn validate(raw: &RawConfig) -> Result<(), String> {
    let p = raw.router.interjection_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(format!("router.interjection_probability must be within 0..=1, got {p}"));
    }
    if raw.comms.http.max_concurrent == 0 {
        return Err("comms.http.max_concurrent must be at least 1".to_string());
    }
    Ok(())
}

fn resolve(parsed: RawConfig, log_level_override: Option<&str>, api_key: Option<String>) -> Config {
    let s = parsed.supervisor;
    let log_level = log_level_override.unwrap_or(&s.log_level).to_string();

    Config {
        bot_name: s.bot_name,
        log_level,
        persona: PersonaConfig {
            prompts_dir: expand_home(&parsed.persona.prompts_dir),
            persona_file: parsed.persona.persona_file,
        },
        router: RouterConfig {
            history_turns: parsed.router.history_turns,
            min_response_chars: parsed.router.min_response_chars,
            require_non_english: parsed.router.require_non_english,
            max_english_stopwords: parsed.router.max_english_stopwords,
            interjection_probability: parsed.router.interjection_probability,
            seed: parsed.router.seed,
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                top_p: parsed.llm.openai.top_p,
                max_tokens: parsed.llm.openai.max_tokens,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        llm_api_key: api_key,
        facts: FactsConfig {
            presidents: parsed.facts.presidents,
            prime_ministers: parsed.facts.prime_ministers,
            chief_ministers: parsed.facts.chief_ministers,
        },
        comms: CommsConfig {
            pty: PtyConfig { enabled: parsed.comms.pty.enabled },
            http: HttpConfig {
                enabled: parsed.comms.http.enabled,
                bind: parsed.comms.http.bind,
                queue_size: parsed.comms.http.queue_size,
                max_concurrent: parsed.comms.http.max_concurrent,
            },
        },
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

impl Default for RouterConfig {
    fn default() -> Self {
        let raw = RawRouter::default();
        Self {
            history_turns: raw.history_turns,
            min_response_chars: raw.min_response_chars,
            require_non_english: raw.require_non_english,
            max_english_stopwords: raw.max_english_stopwords,
            interjection_probability: raw.interjection_probability,
            seed: raw.seed,
        }
    }
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for tests: dummy LLM, no API keys, no external calls.
impl Config {
    pub fn test_default() -> Self {
        let mut cfg = resolve(RawConfig::default(), None, None);
        cfg.router.seed = Some(7);
        cfg.comms.pty.enabled = false;
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[supervisor]
bot_name = "test-bot"
log_level = "info"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_basic_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.bot_name, "test-bot");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.llm.provider, "dummy");
        assert_eq!(cfg.router.history_turns, 2);
        assert!(cfg.comms.pty.enabled);
        assert!(!cfg.comms.http.enabled);
    }

    #[test]
    fn router_and_llm_sections_parse() {
        let f = write_toml(
            r#"
[router]
history_turns = 1
require_non_english = true
interjection_probability = 0.0
seed = 42

[llm]
default = "openai"

[llm.openai]
model = "Qwen/Qwen2.5-0.5B-Instruct"
max_tokens = 256
"#,
        );
        let cfg = load_from(f.path(), None, Some("secret".into())).unwrap();
        assert_eq!(cfg.router.history_turns, 1);
        assert!(cfg.router.require_non_english);
        assert_eq!(cfg.router.seed, Some(42));
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.openai.model, "Qwen/Qwen2.5-0.5B-Instruct");
        assert_eq!(cfg.llm.openai.max_tokens, 256);
        assert_eq!(cfg.llm.openai.top_p, 0.9);
        assert_eq!(cfg.llm_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn facts_overrides_parse() {
        let f = write_toml(
            r#"
[facts.presidents]
usa = "Someone Else"

[facts.chief_ministers]
kerala = "Another Person"
"#,
        );
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.facts.presidents.get("usa").map(String::as_str), Some("Someone Else"));
        assert_eq!(cfg.facts.chief_ministers.len(), 1);
        assert!(cfg.facts.prime_ministers.is_empty());
    }

    #[test]
    fn out_of_range_probability_errors() {
        let f = write_toml("[router]\ninterjection_probability = 1.5\n");
        let msg = load_from(f.path(), None, None).unwrap_err().to_string();
        assert!(msg.contains("interjection_probability"));
    }

    #[test]
    fn zero_concurrency_errors() {
        let f = write_toml("[comms.http]\nmax_concurrent = 0\n");
        assert!(load_from(f.path(), None, None).is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.thani/prompts");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("prompts"));
    }

    #[test]
    fn relative_path_unchanged() {
        assert_eq!(expand_home("config/prompts"), PathBuf::from("config/prompts"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), None, None);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn log_level_override_wins() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("debug"), None).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }
}
