//! Site configuration
//!
//! Everything is optional: an empty document yields the stock site
//! behaviour. A typical override looks like
//!
//! ```toml
//! log_filter = "folio=debug"
//!
//! [timings]
//! transition_delay_ms = 600
//!
//! [timings.typing]
//! type_ms = 80
//!
//! [[phrases]]
//! title = "Hello there"
//! subtitle = "Systems programmer"
//!
//! [roles]
//! main = "#content"
//!
//! [features]
//! theme_toggle = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use folio_animation::{default_phrases, PhrasePair, TypingTimings};
use folio_effects::{LoaderTimings, NotificationTimings, RoleConfig, Roles};

use crate::error::{AppError, Result};

/// Top-level configuration of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub timings: Timings,
    /// Title/subtitle pairs cycled by the typing effect
    pub phrases: Vec<PhrasePair>,
    pub roles: RoleConfig,
    pub features: Features,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            timings: Timings::default(),
            phrases: default_phrases(),
            roles: RoleConfig::default(),
            features: Features::default(),
        }
    }
}

/// Effect delays in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Overlay shown to full navigation
    pub transition_delay_ms: u64,
    /// Startup to first typing tick
    pub typing_start_delay_ms: u64,
    /// Delay between staggered child reveals
    pub reveal_stagger_ms: u64,
    /// Bar visible to width change
    pub progress_bar_delay_ms: u64,
    /// Delay between staggered filter reveals
    pub filter_stagger_ms: u64,
    /// Lifetime of a click ripple
    pub ripple_ms: u64,
    /// Slide-up duration of the mobile menu
    pub menu_close_ms: u64,
    pub typing: TypingTimings,
    pub notification: NotificationTimings,
    pub loader: LoaderTimings,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            transition_delay_ms: 800,
            typing_start_delay_ms: 1000,
            reveal_stagger_ms: 100,
            progress_bar_delay_ms: 200,
            filter_stagger_ms: 50,
            ripple_ms: 600,
            menu_close_ms: 300,
            typing: TypingTimings::default(),
            notification: NotificationTimings::default(),
            loader: LoaderTimings::default(),
        }
    }
}

/// Optional effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub theme_toggle: bool,
    pub typing: bool,
    pub loader: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            theme_toggle: false,
            typing: true,
            loader: true,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check values serde cannot: phrases, selectors and loader bounds
    pub fn validate(&self) -> Result<()> {
        if self.phrases.is_empty() {
            return Err(folio_animation::AnimationError::EmptyPhraseList.into());
        }
        Roles::from_config(&self.roles)?;

        let increment = self.timings.loader.max_increment;
        if !(increment.is_finite() && increment > 0.0) {
            return Err(folio_animation::AnimationError::InvalidIncrement(increment).into());
        }
        if self.log_filter.trim().is_empty() {
            return Err(AppError::InvalidConfig("log_filter must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FolioError;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SiteConfig::from_toml_str("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config = SiteConfig::from_toml_str(
            r##"
            log_filter = "folio=debug"

            [timings]
            transition_delay_ms = 600

            [timings.typing]
            type_ms = 80

            [[phrases]]
            title = "Hello there"
            subtitle = "Systems programmer"

            [roles]
            main = "#content"

            [features]
            theme_toggle = true
            "##,
        )
        .unwrap();

        assert_eq!(config.log_filter, "folio=debug");
        assert_eq!(config.timings.transition_delay_ms, 600);
        assert_eq!(config.timings.typing.type_ms, 80);
        assert_eq!(config.timings.typing.delete_ms, 50);
        assert_eq!(config.timings.menu_close_ms, 300);
        assert_eq!(config.phrases, vec![PhrasePair::new("Hello there", "Systems programmer")]);
        assert_eq!(config.roles.main, "#content");
        assert_eq!(config.roles.overlay, ".page-transition-overlay");
        assert!(config.features.theme_toggle);
        assert!(config.features.loader);
    }

    #[test]
    fn test_rejects_empty_phrases() {
        let mut config = SiteConfig::default();
        config.phrases.clear();
        assert!(matches!(
            config.validate(),
            Err(AppError::Animation(folio_animation::AnimationError::EmptyPhraseList))
        ));
    }

    #[test]
    fn test_rejects_bad_selector() {
        let err = SiteConfig::from_toml_str("[roles]\nnavbar = \"nav a\"\n").unwrap_err();
        assert!(matches!(err, AppError::Folio(FolioError::Selector { .. })));
    }

    #[test]
    fn test_rejects_bad_toml_and_increment() {
        assert!(matches!(
            SiteConfig::from_toml_str("timings = 3"),
            Err(AppError::ConfigParse(_))
        ));
        assert!(matches!(
            SiteConfig::from_toml_str("[timings.loader]\nmax_increment = -1.0\n"),
            Err(AppError::Animation(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load(Path::new("/nonexistent/folio.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
