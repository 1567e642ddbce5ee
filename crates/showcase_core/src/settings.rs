use std::time::Duration;

use serde::Deserialize;

use crate::{IntroCue, IntroTarget, LayoutSettings, SettingsError};

/// Page-wide tuning. Every field has a default, so a settings block only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ShowcaseSettings {
    pub embed: EmbedSettings,
    pub layout: LayoutSettings,
    pub scroll: ScrollSettings,
    pub fade: FadeSettings,
    pub intro: IntroSettings,
}

impl ShowcaseSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    pub load_timeout_ms: u64,
    pub resize_debounce_ms: u64,
    pub grid_initial_delay_ms: u64,
    pub grid_stagger_ms: u64,
    /// Frame capability allowlist. Must never grant top-level navigation.
    pub sandbox: String,
    /// Permissions policy for the frame.
    pub allow: String,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            load_timeout_ms: 10_000,
            resize_debounce_ms: 250,
            grid_initial_delay_ms: 100,
            grid_stagger_ms: 100,
            sandbox: "allow-same-origin allow-scripts allow-forms allow-popups allow-modals"
                .to_string(),
            allow: "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                .to_string(),
        }
    }
}

impl EmbedSettings {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn grid_initial_delay(&self) -> Duration {
        Duration::from_millis(self.grid_initial_delay_ms)
    }

    pub fn grid_stagger(&self) -> Duration {
        Duration::from_millis(self.grid_stagger_ms)
    }

    /// Sandbox tokens with anything granting top-level navigation removed.
    pub fn sandbox_tokens(&self) -> String {
        self.sandbox
            .split_whitespace()
            .filter(|token| !token.starts_with("allow-top-navigation"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub nav_id: String,
    pub spacer_id: String,
    /// Ordered; index `i` highlights the `i`-th link of the nav.
    pub section_ids: Vec<String>,
    pub lookahead_px: f64,
    /// Extra bias applied to the active-section window while the nav is not
    /// sticky.
    pub unstuck_bias_px: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            nav_id: "sticky-nav".to_string(),
            spacer_id: "nav-spacer".to_string(),
            section_ids: vec![
                "products".to_string(),
                "automations".to_string(),
                "web-design".to_string(),
            ],
            lookahead_px: 100.0,
            unstuck_bias_px: 50.0,
        }
    }
}

/// One group of elements revealed by the same watcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FadeCollection {
    pub name: String,
    pub selectors: Vec<String>,
    pub stagger_ms: u64,
    /// The collection is only watched when one of these matches. Empty means
    /// any of `selectors`.
    #[serde(default)]
    pub gate: Vec<String>,
    /// Selectors that contribute their first match only.
    #[serde(default)]
    pub first_only: Vec<String>,
}

impl FadeCollection {
    pub fn new(name: &str, selectors: &[&str], stagger_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            selectors: owned(selectors),
            stagger_ms,
            gate: Vec::new(),
            first_only: Vec::new(),
        }
    }

    pub fn gated_by(mut self, selectors: &[&str]) -> Self {
        self.gate = owned(selectors);
        self
    }

    pub fn with_first_only(mut self, selectors: &[&str]) -> Self {
        self.first_only = owned(selectors);
        self
    }

    pub fn takes_first_only(&self, selector: &str) -> bool {
        self.first_only.iter().any(|s| s == selector)
    }

    /// Selectors whose presence activates the collection.
    pub fn gate_selectors(&self) -> &[String] {
        if self.gate.is_empty() {
            &self.selectors
        } else {
            &self.gate
        }
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeSettings {
    pub threshold: f64,
    pub root_margin: String,
    pub collections: Vec<FadeCollection>,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            collections: vec![
                FadeCollection::new("products", &[".product-card"], 150),
                FadeCollection::new("deep-dive", &[".model-section", ".content-section"], 100)
                    .gated_by(&[".content-section"])
                    .with_first_only(&[".model-section"]),
                FadeCollection::new("automations", &[".automation-card"], 100),
                FadeCollection::new(
                    "web-design",
                    &[".pillar-card", ".website-card", ".methodology-quote"],
                    100,
                )
                .gated_by(&[".pillar-card", ".website-card"])
                .with_first_only(&[".methodology-quote"]),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntroSettings {
    pub right_dot_ms: u64,
    pub left_dot_ms: u64,
    pub studio_text_ms: u64,
    pub tagline_ms: u64,
    pub anchor_settle_ms: u64,
    pub dot_transition: String,
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            right_dot_ms: 500,
            left_dot_ms: 800,
            studio_text_ms: 1200,
            tagline_ms: 1900,
            anchor_settle_ms: 300,
            dot_transition: "opacity 1.5s ease-in-out".to_string(),
        }
    }
}

impl IntroSettings {
    /// Reveal cues in firing order.
    pub fn timeline(&self) -> Vec<IntroCue> {
        let mut cues = vec![
            IntroCue::new(IntroTarget::RightDot, self.right_dot_ms),
            IntroCue::new(IntroTarget::LeftDot, self.left_dot_ms),
            IntroCue::new(IntroTarget::StudioText, self.studio_text_ms),
            IntroCue::new(IntroTarget::Tagline, self.tagline_ms),
        ];
        cues.sort_by_key(|cue| cue.at);
        cues
    }

    pub fn anchor_settle(&self) -> Duration {
        Duration::from_millis(self.anchor_settle_ms)
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
