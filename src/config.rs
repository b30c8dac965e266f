//! Session configuration from the environment.

use std::str::FromStr;

use crate::{
    colour::DEFAULT_BANDING_PERIOD,
    error::{Error, Result},
    precision::PrecisionPolicy,
    raytrace::DEFAULT_MAX_BOUNCES,
};

pub const THREADS_VAR: &str = "PV_THREADS";
pub const PRECISION_VAR: &str = "PV_PRECISION";
pub const BANDING_PERIOD_VAR: &str = "PV_BANDING_PERIOD";
pub const MAX_BOUNCES_VAR: &str = "PV_MAX_BOUNCES";
pub const MAX_ITERATIONS_VAR: &str = "PV_MAX_ITERATIONS";

const DEFAULT_MAX_ITERATIONS: u32 = 4096;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub threads: usize,
    pub precision: PrecisionPolicy,
    pub banding_period: u32,
    pub max_bounces: u32,
    /// Upper bound of the zoom-dependent iteration budget.
    pub max_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            precision: PrecisionPolicy::Auto,
            banding_period: DEFAULT_BANDING_PERIOD,
            max_bounces: DEFAULT_MAX_BOUNCES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(THREADS_VAR) {
            config.threads = parse_positive(THREADS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(PRECISION_VAR) {
            config.precision = PrecisionPolicy::parse(&raw).ok_or_else(|| Error::Config {
                key: PRECISION_VAR,
                value: raw.clone(),
                reason: "expected auto, single or double".to_string(),
            })?;
        }
        if let Some(raw) = lookup(BANDING_PERIOD_VAR) {
            config.banding_period = parse_positive(BANDING_PERIOD_VAR, &raw)?;
        }
        if let Some(raw) = lookup(MAX_BOUNCES_VAR) {
            config.max_bounces = parse_positive(MAX_BOUNCES_VAR, &raw)?;
        }
        if let Some(raw) = lookup(MAX_ITERATIONS_VAR) {
            config.max_iterations = parse_positive(MAX_ITERATIONS_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|error: T::Err| Error::Config {
        key,
        value: raw.to_string(),
        reason: error.to_string(),
    })?;
    if value <= T::default() {
        return Err(Error::Config {
            key,
            value: raw.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.threads >= 1);
    }

    #[test]
    fn reads_every_setting() {
        let config = Config::from_lookup(lookup(&[
            (THREADS_VAR, "3"),
            (PRECISION_VAR, "single"),
            (BANDING_PERIOD_VAR, " 64 "),
            (MAX_BOUNCES_VAR, "5"),
            (MAX_ITERATIONS_VAR, "2048"),
        ]))
        .unwrap();

        assert_eq!(config.threads, 3);
        assert_eq!(config.precision, PrecisionPolicy::Single);
        assert_eq!(config.banding_period, 64);
        assert_eq!(config.max_bounces, 5);
        assert_eq!(config.max_iterations, 2048);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        let zero = Config::from_lookup(lookup(&[(THREADS_VAR, "0")]));
        assert!(matches!(zero, Err(Error::Config { key: THREADS_VAR, .. })));

        let garbage = Config::from_lookup(lookup(&[(BANDING_PERIOD_VAR, "lots")]));
        assert!(matches!(
            garbage,
            Err(Error::Config {
                key: BANDING_PERIOD_VAR,
                ..
            })
        ));

        let precision = Config::from_lookup(lookup(&[(PRECISION_VAR, "half")]));
        assert!(matches!(precision, Err(Error::Config { .. })));
    }
}
