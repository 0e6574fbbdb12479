use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder endpoint value shipped in the default config. As long as the
/// endpoint equals this sentinel (or is unset) the remote delivery path is
/// treated as unconfigured and the mail fallback is used directly.
pub const UNCONFIGURED_ENDPOINT: &str = "https://example.invalid/your-webhook-here";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub choreography: ChoreographyConfig,

    #[serde(default)]
    pub cinematic: CinematicConfig,

    #[serde(default)]
    pub gift: GiftConfig,

    /// What the experience ends on once the cinematic sequence completes.
    #[serde(default)]
    pub reward: RewardVariant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            gate: GateConfig::default(),
            choreography: ChoreographyConfig::default(),
            cinematic: CinematicConfig::default(),
            gift: GiftConfig::default(),
            reward: RewardVariant::default(),
        }
    }
}

// ── Terminal reward variant ───────────────────────────────────────

/// The two historical builds of the experience ended differently: one on a
/// static surprise-link page, one on the wish-collection form. Unified here
/// as a configuration choice rather than separate code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewardVariant {
    /// Static congratulatory view with a claimable link.
    SurpriseLink,
    /// Free-text wish form with remote delivery + mail fallback.
    #[default]
    GiftIntake,
}

// ── Passcode gate ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Plaintext 4-digit secret. Ignored when `secret_sha256` is set.
    #[serde(default = "default_secret_code")]
    pub secret_code: Option<String>,

    /// Hex SHA-256 digest of the secret. Takes precedence over
    /// `secret_code` so the plaintext never has to live in the config file.
    #[serde(default)]
    pub secret_sha256: Option<String>,

    /// Failed attempts before lockout. `None` disables lockout entirely.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: Option<u32>,

    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,

    /// How long the "access denied" flash stays visible.
    #[serde(default = "default_error_flash_ms")]
    pub error_flash_ms: u64,

    /// Presentation delay between a correct code and the unlocked screen.
    #[serde(default = "default_unlock_delay_ms")]
    pub unlock_delay_ms: u64,
}

fn default_secret_code() -> Option<String> {
    Some("2510".into())
}
fn default_max_attempts() -> Option<u32> {
    Some(5)
}
fn default_lockout_secs() -> u64 {
    30
}
fn default_error_flash_ms() -> u64 {
    1_000
}
fn default_unlock_delay_ms() -> u64 {
    3_000
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret_code: default_secret_code(),
            secret_sha256: None,
            max_attempts: default_max_attempts(),
            lockout_secs: default_lockout_secs(),
            error_flash_ms: default_error_flash_ms(),
            unlock_delay_ms: default_unlock_delay_ms(),
        }
    }
}

impl GateConfig {
    pub fn lockout(&self) -> Duration {
        Duration::from_secs(self.lockout_secs)
    }

    pub fn error_flash(&self) -> Duration {
        Duration::from_millis(self.error_flash_ms)
    }

    pub fn unlock_delay(&self) -> Duration {
        Duration::from_millis(self.unlock_delay_ms)
    }
}

// ── Proposal choreography ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreographyConfig {
    /// Evasions of the "No" button before the first reveal batch starts.
    #[serde(default = "default_evasion_threshold")]
    pub evasion_threshold: u32,

    /// Button offset bound per axis, in pixels. Offsets are drawn uniformly
    /// from ±this value so the button never leaves the screen.
    #[serde(default = "default_jitter_px")]
    pub jitter_px: f32,

    /// Dwell time of each reveal message.
    #[serde(default = "default_message_interval_ms")]
    pub message_interval_ms: u64,

    /// Dwell time of the closing line (index 6), held a little longer.
    #[serde(default = "default_closing_interval_ms")]
    pub closing_interval_ms: u64,

    /// Pause between acceptance and the cinematic sequence starting.
    #[serde(default = "default_acceptance_pause_ms")]
    pub acceptance_pause_ms: u64,
}

fn default_evasion_threshold() -> u32 {
    3
}
fn default_jitter_px() -> f32 {
    130.0
}
fn default_message_interval_ms() -> u64 {
    3_200
}
fn default_closing_interval_ms() -> u64 {
    4_500
}
fn default_acceptance_pause_ms() -> u64 {
    800
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            evasion_threshold: default_evasion_threshold(),
            jitter_px: default_jitter_px(),
            message_interval_ms: default_message_interval_ms(),
            closing_interval_ms: default_closing_interval_ms(),
            acceptance_pause_ms: default_acceptance_pause_ms(),
        }
    }
}

impl ChoreographyConfig {
    pub fn message_interval(&self) -> Duration {
        Duration::from_millis(self.message_interval_ms)
    }

    pub fn closing_interval(&self) -> Duration {
        Duration::from_millis(self.closing_interval_ms)
    }

    pub fn acceptance_pause(&self) -> Duration {
        Duration::from_millis(self.acceptance_pause_ms)
    }
}

// ── Cinematic sequence ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinematicConfig {
    #[serde(default = "default_beach_ms")]
    pub beach_ms: u64,

    #[serde(default = "default_drive_ms")]
    pub drive_ms: u64,
}

fn default_beach_ms() -> u64 {
    3_500
}
fn default_drive_ms() -> u64 {
    5_500
}

impl Default for CinematicConfig {
    fn default() -> Self {
        Self {
            beach_ms: default_beach_ms(),
            drive_ms: default_drive_ms(),
        }
    }
}

impl CinematicConfig {
    pub fn beach_duration(&self) -> Duration {
        Duration::from_millis(self.beach_ms)
    }

    pub fn drive_duration(&self) -> Duration {
        Duration::from_millis(self.drive_ms)
    }
}

// ── Gift intake ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftConfig {
    /// Remote delivery endpoint. Left at the sentinel (or unset) the remote
    /// path is skipped and every submission goes straight to the fallback.
    #[serde(default = "default_endpoint")]
    pub endpoint: Option<String>,

    /// Recipient of the mail-compose fallback.
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Fixed subject line for both delivery paths.
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Maximum wish length, enforced at input time.
    #[serde(default = "default_max_wish_len")]
    pub max_wish_len: usize,

    /// Claim URL for the surprise-link reward variant.
    #[serde(default)]
    pub surprise_url: Option<String>,
}

fn default_endpoint() -> Option<String> {
    Some(UNCONFIGURED_ENDPOINT.into())
}
fn default_recipient() -> String {
    "yourlove@example.com".into()
}
fn default_subject() -> String {
    "A wish from your valentine".into()
}
fn default_max_wish_len() -> usize {
    500
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            recipient: default_recipient(),
            subject: default_subject(),
            max_wish_len: default_max_wish_len(),
            surprise_url: None,
        }
    }
}

impl GiftConfig {
    /// An endpoint still at the sentinel placeholder counts as unset.
    pub fn configured_endpoint(&self) -> Option<&str> {
        match self.endpoint.as_deref() {
            Some(url) if !url.trim().is_empty() && url != UNCONFIGURED_ENDPOINT => Some(url),
            _ => None,
        }
    }
}

// ── Load / save / validation ──────────────────────────────────────

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let heartlock_dir = home.join(".heartlock");
        let config_path = heartlock_dir.join("config.toml");

        if !heartlock_dir.exists() {
            fs::create_dir_all(&heartlock_dir).context("Failed to create .heartlock directory")?;
        }

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(code) = std::env::var("HEARTLOCK_SECRET_CODE") {
            if !code.is_empty() {
                self.gate.secret_code = Some(code);
                self.gate.secret_sha256 = None;
            }
        }

        if let Ok(digest) = std::env::var("HEARTLOCK_SECRET_SHA256") {
            if !digest.is_empty() {
                self.gate.secret_sha256 = Some(digest);
            }
        }

        if let Ok(endpoint) = std::env::var("HEARTLOCK_GIFT_ENDPOINT") {
            if !endpoint.is_empty() {
                self.gift.endpoint = Some(endpoint);
            }
        }

        if let Ok(recipient) = std::env::var("HEARTLOCK_GIFT_RECIPIENT") {
            if !recipient.is_empty() {
                self.gift.recipient = recipient;
            }
        }
    }

    /// Reject configurations the engine cannot run on. A malformed digest is
    /// deliberately *not* an error here: the gate degrades to rejecting every
    /// code, which keeps it safe-closed.
    pub fn validate(&self) -> Result<()> {
        if self.gate.secret_sha256.is_none() {
            match self.gate.secret_code.as_deref() {
                None => {
                    return Err(ConfigError::Validation(
                        "either gate.secret_code or gate.secret_sha256 must be set".into(),
                    )
                    .into());
                }
                Some(code) if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) => {
                    return Err(ConfigError::Validation(
                        "gate.secret_code must be exactly 4 digits".into(),
                    )
                    .into());
                }
                Some(_) => {}
            }
        }

        if self.gate.max_attempts == Some(0) {
            return Err(ConfigError::Validation(
                "gate.max_attempts must be at least 1 (or unset to disable lockout)".into(),
            )
            .into());
        }

        if self.choreography.evasion_threshold == 0 {
            return Err(ConfigError::Validation(
                "choreography.evasion_threshold must be at least 1".into(),
            )
            .into());
        }

        if !(self.choreography.jitter_px > 0.0) {
            return Err(ConfigError::Validation(
                "choreography.jitter_px must be positive".into(),
            )
            .into());
        }

        if self.gift.max_wish_len == 0 {
            return Err(
                ConfigError::Validation("gift.max_wish_len must be positive".into()).into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_validates() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn default_endpoint_counts_as_unconfigured() {
        let config = Config::default();
        assert!(config.gift.configured_endpoint().is_none());
    }

    #[test]
    fn real_endpoint_is_detected() {
        let mut config = Config::default();
        config.gift.endpoint = Some("https://hooks.example.com/wish".into());
        assert_eq!(
            config.gift.configured_endpoint(),
            Some("https://hooks.example.com/wish")
        );
    }

    #[test]
    fn non_numeric_secret_rejected() {
        let mut config = Config::default();
        config.gate.secret_code = Some("abcd".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn digest_secret_skips_plaintext_validation() {
        let mut config = Config::default();
        config.gate.secret_code = None;
        config.gate.secret_sha256 = Some("ff".repeat(32));
        config.validate().unwrap();
    }

    #[test]
    fn zero_max_attempts_rejected() {
        let mut config = Config::default();
        config.gate.max_attempts = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn lockout_can_be_disabled() {
        let mut config = Config::default();
        config.gate.max_attempts = None;
        config.validate().unwrap();
    }

    #[test]
    fn toml_round_trip_preserves_durations() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config {
            config_path: path.clone(),
            ..Config::default()
        };
        config.cinematic.beach_ms = 1_234;
        config.gate.unlock_delay_ms = 1_500;
        config.save().unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.cinematic.beach_ms, 1_234);
        assert_eq!(loaded.gate.unlock_delay_ms, 1_500);
        assert_eq!(loaded.gate.secret_code.as_deref(), Some("2510"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[gate]\nsecret_code = \"1111\"\n").unwrap();
        assert_eq!(config.choreography.evasion_threshold, 3);
        assert_eq!(config.cinematic.drive_ms, 5_500);
        assert_eq!(config.reward, RewardVariant::GiftIntake);
    }

    #[test]
    fn load_failures_carry_typed_config_errors() {
        let tmp = TempDir::new().unwrap();

        let path = tmp.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Load(_))
        ));

        let err = Config::load_from_path(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn partial_gate_section_keeps_the_default_secret() {
        // Setting only an unrelated gate field must behave like omitting
        // the section entirely.
        let config: Config = toml::from_str("[gate]\nlockout_secs = 60\n").unwrap();
        assert_eq!(config.gate.secret_code.as_deref(), Some("2510"));
        assert_eq!(config.gate.lockout_secs, 60);
        config.validate().unwrap();
    }
}
