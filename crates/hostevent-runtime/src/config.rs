//! Event backend configuration
//!
//! `HEV_EVENT_BACKEND` = `auto` (default), `futex`, or `condvar`
//! (`fallback` is accepted as an alias).

use hostevent_core::{env_get_opt, kwarn};
use hostevent_core::BackendKind;
use std::str::FromStr;

/// Requested backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendChoice {
    /// futex where the probe succeeds, condvar otherwise
    #[default]
    Auto,

    /// Always this backend
    Force(BackendKind),
}

impl FromStr for BackendChoice {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(BackendChoice::Auto);
        }
        s.parse().map(BackendChoice::Force)
    }
}

/// Configuration for newly created events
#[derive(Debug, Clone, Default)]
pub struct EventConfig {
    pub backend: BackendChoice,
}

impl EventConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `HEV_EVENT_BACKEND`. An unparsable value is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(raw) = std::env::var("HEV_EVENT_BACKEND") {
            match env_get_opt::<BackendChoice>("HEV_EVENT_BACKEND") {
                Some(choice) => config.backend = choice,
                None => kwarn!("ignoring HEV_EVENT_BACKEND={:?}", raw),
            }
        }
        config
    }

    /// Set the backend choice
    pub fn backend(mut self, choice: BackendChoice) -> Self {
        self.backend = choice;
        self
    }

    /// Check the choice against what the platform provides
    pub fn validate(&self, futex_available: bool) -> Result<(), &'static str> {
        if self.backend == BackendChoice::Force(BackendKind::Futex) && !futex_available {
            return Err("futex backend requested but futex is not available");
        }
        Ok(())
    }

    /// Concrete backend for this config. A futex request that fails
    /// [`validate`](Self::validate) degrades to condvar with a warning.
    pub fn resolve(&self, futex_available: bool) -> BackendKind {
        if let Err(msg) = self.validate(futex_available) {
            kwarn!("{}, using condvar", msg);
            return BackendKind::Condvar;
        }
        match self.backend {
            BackendChoice::Auto if futex_available => BackendKind::Futex,
            BackendChoice::Auto => BackendKind::Condvar,
            BackendChoice::Force(kind) => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse() {
        assert_eq!("auto".parse(), Ok(BackendChoice::Auto));
        assert_eq!("AUTO".parse(), Ok(BackendChoice::Auto));
        assert_eq!("futex".parse(), Ok(BackendChoice::Force(BackendKind::Futex)));
        assert_eq!("fallback".parse(), Ok(BackendChoice::Force(BackendKind::Condvar)));
        assert!("sem".parse::<BackendChoice>().is_err());
    }

    #[test]
    fn test_resolve_auto() {
        let config = EventConfig::new();
        assert_eq!(config.resolve(true), BackendKind::Futex);
        assert_eq!(config.resolve(false), BackendKind::Condvar);
    }

    #[test]
    fn test_resolve_forced() {
        let config = EventConfig::new().backend(BackendChoice::Force(BackendKind::Condvar));
        assert_eq!(config.resolve(true), BackendKind::Condvar);

        let config = EventConfig::new().backend(BackendChoice::Force(BackendKind::Futex));
        assert!(config.validate(true).is_ok());
        assert!(config.validate(false).is_err());
        assert_eq!(config.resolve(false), BackendKind::Condvar);
    }
}
