// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434/v1";
const DEFAULT_LLM_MODEL: &str = "qwen3";
const DEFAULT_EXIT_CLEAR_DELAY: &str = "300ms";
const DEFAULT_STATUS_CLEAR_DELAY: &str = "4s";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub llm: Llm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            content: Content::default(),
            llm: Llm::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    /// Window between leaving the skill detail and dropping the selection.
    /// Zero is allowed; it makes the clear effectively immediate.
    pub exit_clear_delay: Option<String>,
    pub status_clear_delay: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            exit_clear_delay: Some(DEFAULT_EXIT_CLEAR_DELAY.to_owned()),
            status_clear_delay: Some(DEFAULT_STATUS_CLEAR_DELAY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Content {
    pub pack_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Llm {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub extra_context: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Llm {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            base_url: Some(DEFAULT_LLM_BASE_URL.to_owned()),
            model: Some(DEFAULT_LLM_MODEL.to_owned()),
            extra_context: Some(String::new()),
            timeout: Some("5s".to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SKILLDECK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SKILLDECK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(skilldeck_content::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [ui], [content], and [llm]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(pack_path) = &self.content.pack_path {
            skilldeck_content::validate_pack_path(pack_path)?;
        }

        if let Some(delay) = &self.ui.exit_clear_delay {
            parse_duration(delay)
                .with_context(|| format!("invalid ui.exit_clear_delay in {}", path.display()))?;
        }

        if let Some(delay) = &self.ui.status_clear_delay {
            let parsed = parse_duration(delay)
                .with_context(|| format!("invalid ui.status_clear_delay in {}", path.display()))?;
            if parsed <= Duration::ZERO {
                bail!(
                    "ui.status_clear_delay in {} must be positive, got {}",
                    path.display(),
                    delay
                );
            }
        }

        if let Some(timeout) = &self.llm.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "llm.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        Ok(())
    }

    pub fn pack_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.content.pack_path {
            return Some(PathBuf::from(path));
        }
        env::var_os("SKILLDECK_PACK_PATH").map(PathBuf::from)
    }

    pub fn exit_clear_delay(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .exit_clear_delay
                .as_deref()
                .unwrap_or(DEFAULT_EXIT_CLEAR_DELAY),
        )
    }

    pub fn status_clear_delay(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .status_clear_delay
                .as_deref()
                .unwrap_or(DEFAULT_STATUS_CLEAR_DELAY),
        )
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.enabled.unwrap_or(true)
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_LLM_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn llm_model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_LLM_MODEL)
    }

    pub fn llm_timeout(&self) -> Result<Duration> {
        parse_duration(self.llm.timeout.as_deref().unwrap_or("5s"))
    }

    pub fn llm_extra_context(&self) -> &str {
        self.llm.extra_context.as_deref().unwrap_or("")
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# skilldeck config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# How long the outgoing skill-detail view keeps its selection after going\n# back. Zero clears immediately.\nexit_clear_delay = \"{}\"\nstatus_clear_delay = \"{}\"\n\n[content]\n# Optional. Default is the built-in demo pack.\n# pack_path = \"/absolute/path/to/pack.json\"\n\n[llm]\nenabled = true\nbase_url = \"{}\"\nmodel = \"{}\"\nextra_context = \"\"\ntimeout = \"5s\"\n",
            path.display(),
            DEFAULT_EXIT_CLEAR_DELAY,
            DEFAULT_STATUS_CLEAR_DELAY,
            DEFAULT_LLM_BASE_URL,
            DEFAULT_LLM_MODEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 300ms or 5s)")
}
