//! Admin session and UI preferences.
//!
//! The admin surface is gated by a single shared password compared against
//! the configured expected value. A successful comparison flips a
//! session-scoped flag, deliberately in-memory only, unlike the longer-lived
//! cache keys, so it never survives a restart. UI preferences (color scheme,
//! sidebar state, onboarding-seen) do persist, each under its own cache key.

use crate::cache::{CacheStore, keys};
use crate::config::Config;
use crate::error::Result;

/// Session-scoped admin flag.
#[derive(Debug, Default)]
pub struct AdminSession {
    authenticated: bool,
}

impl AdminSession {
    /// Fresh, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against the configured password. With no password configured
    /// the admin surface stays locked.
    pub fn login(&mut self, config: &Config, password: &str) -> bool {
        let expected = match &config.admin_password {
            Some(p) => p,
            None => return false,
        };
        if expected == password {
            self.authenticated = true;
        }
        self.authenticated
    }

    /// Drop the session.
    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    /// Whether the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Light mode.
    Light,
    /// Dark mode.
    Dark,
}

impl ColorScheme {
    fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Accessor over the preference cache keys.
pub struct Preferences<'a> {
    cache: &'a dyn CacheStore,
}

impl<'a> Preferences<'a> {
    /// Wrap a cache handle.
    pub fn new(cache: &'a dyn CacheStore) -> Self {
        Self { cache }
    }

    /// Stored color scheme, `None` when the user never chose one (the UI
    /// then follows the system preference).
    pub fn color_scheme(&self) -> Result<Option<ColorScheme>> {
        Ok(match self.cache.get(keys::THEME)?.as_deref() {
            Some("dark") => Some(ColorScheme::Dark),
            Some("light") => Some(ColorScheme::Light),
            _ => None,
        })
    }

    /// Persist the color scheme.
    pub fn set_color_scheme(&self, scheme: ColorScheme) -> Result<()> {
        self.cache.set(keys::THEME, scheme.as_str())
    }

    /// Whether the sidebar is collapsed.
    pub fn sidebar_collapsed(&self) -> Result<bool> {
        Ok(self.cache.get(keys::SIDEBAR_COLLAPSED)?.as_deref() == Some("true"))
    }

    /// Persist the sidebar state.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> Result<()> {
        self.cache.set(
            keys::SIDEBAR_COLLAPSED,
            if collapsed { "true" } else { "false" },
        )
    }

    /// Whether the onboarding tour has been seen.
    pub fn onboarding_completed(&self) -> Result<bool> {
        Ok(self.cache.get(keys::ONBOARDING_COMPLETED)?.is_some())
    }

    /// Mark the onboarding tour as seen.
    pub fn complete_onboarding(&self) -> Result<()> {
        self.cache.set(keys::ONBOARDING_COMPLETED, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;

    #[test]
    fn test_login_checks_configured_password() {
        let config = Config {
            admin_password: Some("neodark".into()),
            ..Default::default()
        };

        let mut session = AdminSession::new();
        assert!(!session.login(&config, "wrong"));
        assert!(!session.is_authenticated());

        assert!(session.login(&config, "neodark"));
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_denied_without_configured_password() {
        let config = Config::default();
        let mut session = AdminSession::new();
        assert!(!session.login(&config, "anything"));
    }

    #[test]
    fn test_preferences_round_trip() {
        let cache = MemoryCache::new();
        let prefs = Preferences::new(&cache);

        assert_eq!(prefs.color_scheme().unwrap(), None);
        prefs.set_color_scheme(ColorScheme::Dark).unwrap();
        assert_eq!(prefs.color_scheme().unwrap(), Some(ColorScheme::Dark));

        assert!(!prefs.sidebar_collapsed().unwrap());
        prefs.set_sidebar_collapsed(true).unwrap();
        assert!(prefs.sidebar_collapsed().unwrap());

        assert!(!prefs.onboarding_completed().unwrap());
        prefs.complete_onboarding().unwrap();
        assert!(prefs.onboarding_completed().unwrap());
    }
}
