//! Boundary configuration loading.
//!
//! Defaults merged with `APIKIT_`-prefixed environment variables, e.g.
//! `APIKIT_PRODUCTION=false` or
//! `APIKIT_PROBLEMS_BASE_URL=https://api.acme.dev/problems`.

use figment::Figment;
use figment::providers::{Env, Serialized};

use apikit_errors::ProblemConfig;

/// Environment variable prefix for boundary settings.
pub const ENV_PREFIX: &str = "APIKIT_";

/// Load the boundary configuration from defaults and the environment.
///
/// # Errors
///
/// Returns a [`figment::Error`] when an environment override cannot be
/// deserialized into the config shape.
pub fn load_config() -> Result<ProblemConfig, figment::Error> {
    Figment::from(Serialized::defaults(ProblemConfig::default()))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_safe() {
        figment::Jail::expect_with(|_jail| {
            let cfg = load_config().expect("defaults must load");
            assert!(cfg.production);
            assert_eq!(cfg.problems_base_url, "https://api.example.com/problems");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("APIKIT_PRODUCTION", "false");
            jail.set_env("APIKIT_PROBLEMS_BASE_URL", "https://api.acme.dev/problems");
            let cfg = load_config().expect("env overrides must load");
            assert!(!cfg.production);
            assert_eq!(cfg.problems_base_url, "https://api.acme.dev/problems");
            Ok(())
        });
    }
}
