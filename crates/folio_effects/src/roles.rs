//! Element roles
//!
//! Every element an effect touches is found through a named role. The
//! selector text for each role is configurable; [`Roles`] holds the parsed
//! form.

use serde::{Deserialize, Serialize};

use folio_core::{Result, Selector};

/// Selector text for every role, defaulting to the site's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Region that fades out during a page transition (falls back to body)
    pub main: String,
    pub overlay: String,
    /// Any link; effects decide by its `href`
    pub link: String,
    pub reveal_targets: String,
    /// Descendants of a revealed element revealed with a stagger
    pub reveal_children: String,
    pub progress_bars: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub loader: String,
    pub loader_fill: String,
    /// Elements animated in once the loader is gone
    pub entrance: String,
    pub navbar: String,
    pub nav_link: String,
    pub filter_button: String,
    pub project_card: String,
    pub menu_button: String,
    pub menu: String,
    pub nav_container: String,
    pub theme_toggle: String,
    pub contact_form: String,
    pub notification: String,
    /// Buttons whose clicks are reported to analytics
    pub tracked_button: String,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            main: "main".into(),
            overlay: ".page-transition-overlay".into(),
            link: "a[href]".into(),
            reveal_targets: ".section, .overview-card, .project-card, .certification-card, \
                             .achievement-card, .skill-category"
                .into(),
            reveal_children: ".project-card, .skill-category, .cert-card".into(),
            progress_bars: ".progress-bar".into(),
            hero_title: ".hero-title".into(),
            hero_subtitle: ".hero-subtitle".into(),
            loader: ".page-loader".into(),
            loader_fill: "#progress-fill".into(),
            entrance: ".section, .hero-title, .hero-subtitle".into(),
            navbar: "#navbar".into(),
            nav_link: ".nav-link".into(),
            filter_button: ".filter-btn".into(),
            project_card: ".project-card".into(),
            menu_button: "#mobile-menu-btn".into(),
            menu: "#nav-links".into(),
            nav_container: ".nav-container".into(),
            theme_toggle: ".theme-toggle".into(),
            contact_form: "#contact-form".into(),
            notification: ".notification".into(),
            tracked_button: ".btn, .project-link, .cert-verify".into(),
        }
    }
}

/// Parsed role selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roles {
    pub main: Selector,
    pub overlay: Selector,
    pub link: Selector,
    pub reveal_targets: Selector,
    pub reveal_children: Selector,
    pub progress_bars: Selector,
    pub hero_title: Selector,
    pub hero_subtitle: Selector,
    pub loader: Selector,
    pub loader_fill: Selector,
    pub entrance: Selector,
    pub navbar: Selector,
    pub nav_link: Selector,
    pub filter_button: Selector,
    pub project_card: Selector,
    pub menu_button: Selector,
    pub menu: Selector,
    pub nav_container: Selector,
    pub theme_toggle: Selector,
    pub contact_form: Selector,
    pub notification: Selector,
    pub tracked_button: Selector,
}

impl Roles {
    /// Parse every role, failing on the first invalid selector
    pub fn from_config(config: &RoleConfig) -> Result<Self> {
        Ok(Self {
            main: Selector::parse(&config.main)?,
            overlay: Selector::parse(&config.overlay)?,
            link: Selector::parse(&config.link)?,
            reveal_targets: Selector::parse(&config.reveal_targets)?,
            reveal_children: Selector::parse(&config.reveal_children)?,
            progress_bars: Selector::parse(&config.progress_bars)?,
            hero_title: Selector::parse(&config.hero_title)?,
            hero_subtitle: Selector::parse(&config.hero_subtitle)?,
            loader: Selector::parse(&config.loader)?,
            loader_fill: Selector::parse(&config.loader_fill)?,
            entrance: Selector::parse(&config.entrance)?,
            navbar: Selector::parse(&config.navbar)?,
            nav_link: Selector::parse(&config.nav_link)?,
            filter_button: Selector::parse(&config.filter_button)?,
            project_card: Selector::parse(&config.project_card)?,
            menu_button: Selector::parse(&config.menu_button)?,
            menu: Selector::parse(&config.menu)?,
            nav_container: Selector::parse(&config.nav_container)?,
            theme_toggle: Selector::parse(&config.theme_toggle)?,
            contact_form: Selector::parse(&config.contact_form)?,
            notification: Selector::parse(&config.notification)?,
            tracked_button: Selector::parse(&config.tracked_button)?,
        })
    }
}

#[cfg(test)]
pub(crate) fn default_roles() -> Roles {
    Roles::from_config(&RoleConfig::default()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::FolioError;

    #[test]
    fn test_defaults_parse() {
        let roles = default_roles();
        assert_eq!(roles.reveal_targets.len(), 6);
        assert_eq!(
            roles.reveal_targets.as_str(),
            ".section, .overview-card, .project-card, .certification-card, .achievement-card, .skill-category"
        );
        assert_eq!(roles.tracked_button.len(), 3);
    }

    #[test]
    fn test_invalid_role_is_reported() {
        let config = RoleConfig {
            navbar: "nav > ul".into(),
            ..Default::default()
        };
        let err = Roles::from_config(&config).unwrap_err();
        assert!(matches!(err, FolioError::Selector { selector, .. } if selector == "nav > ul"));
    }
}
