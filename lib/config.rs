use crate::utils::{DEFAULT_LOG_PATH, DEFAULT_READ_MAX};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_LEVEL: &str = "FDSESSION_LEVEL";
pub const ENV_LOG: &str = "FDSESSION_LOG";
pub const ENV_SYNC: &str = "FDSESSION_SYNC";
pub const ENV_READ_MAX: &str = "FDSESSION_READ_MAX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// fsync(2): data and metadata
    #[default]
    Full,
    /// fdatasync(2): data plus the metadata needed to read it back
    Data,
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "fsync" => Ok(SyncMode::Full),
            "data" | "fdatasync" => Ok(SyncMode::Data),
            _ => Err(format!("unknown sync mode {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub level: LevelFilter,
    pub log_path: PathBuf,
    pub sync: SyncMode,
    pub read_max: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            sync: SyncMode::Full,
            read_max: DEFAULT_READ_MAX,
        }
    }
}

impl Options {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Invalid values keep the default. The logger is not up yet when this
    /// runs, so complaints go to stderr.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opt = Self::default();

        if let Some(v) = lookup(ENV_LEVEL) {
            match LevelFilter::from_str(&v) {
                Ok(l) => opt.level = l,
                Err(_) => eprintln!("invalid {} {}, use {}", ENV_LEVEL, v, opt.level),
            }
        }
        if let Some(v) = lookup(ENV_LOG) {
            if v.is_empty() {
                eprintln!("empty {}, use {}", ENV_LOG, opt.log_path.display());
            } else {
                opt.log_path = PathBuf::from(v);
            }
        }
        if let Some(v) = lookup(ENV_SYNC) {
            match v.parse::<SyncMode>() {
                Ok(m) => opt.sync = m,
                Err(e) => eprintln!("{}, use {:?}", e, opt.sync),
            }
        }
        if let Some(v) = lookup(ENV_READ_MAX) {
            match v.parse::<usize>() {
                Ok(n) => opt.read_max = n,
                Err(e) => eprintln!("invalid {} {} error {}, use {}", ENV_READ_MAX, v, e, opt.read_max),
            }
        }
        opt
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(kv: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let m: HashMap<String, String> = kv.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| m.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let opt = Options::from_lookup(lookup(&[]));
        assert_eq!(opt, Options::default());
        assert_eq!(opt.read_max, 100);
        assert_eq!(opt.level, LevelFilter::Warn);
    }

    #[test]
    fn test_override() {
        let opt = Options::from_lookup(lookup(&[
            (ENV_LEVEL, "debug"),
            (ENV_LOG, "/tmp/x.log"),
            (ENV_SYNC, "DATA"),
            (ENV_READ_MAX, "4096"),
        ]));
        assert_eq!(opt.level, LevelFilter::Debug);
        assert_eq!(opt.log_path, PathBuf::from("/tmp/x.log"));
        assert_eq!(opt.sync, SyncMode::Data);
        assert_eq!(opt.read_max, 4096);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let opt = Options::from_lookup(lookup(&[
            (ENV_LEVEL, "loud"),
            (ENV_LOG, ""),
            (ENV_SYNC, "sometimes"),
            (ENV_READ_MAX, "-1"),
        ]));
        assert_eq!(opt, Options::default());
    }
}
