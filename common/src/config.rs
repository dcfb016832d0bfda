//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of `navplot`.
//! This is a configuration file/struct neutral loading engine, storing only the base directory
//! and with `load()` read the proper file or fall back to the defaults of `T`.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::env;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{makepath, Versioned};

/// Config filename
const CONFIG: &str = "config.hcl";

/// Main name for the directory base
const TAG: &str = "navplot";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad config file version v{0}, need v{1}")]
    BadVersion(usize, usize),
    #[error("Unknown config file {0}")]
    Missing(String),
    #[error("Can not find a home directory")]
    NoHome,
}

/// Wrapper around the configuration struct `T` remembering where it comes from.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Result<Self> {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, tag)
            }
            None => {
                #[cfg(unix)]
                let homedir = env::var("HOME").map_err(|_| ConfigError::NoHome)?;

                #[cfg(windows)]
                let homedir = env::var("LOCALAPPDATA").map_err(|_| ConfigError::NoHome)?;

                debug!("base = {homedir}");

                #[cfg(unix)]
                let base: PathBuf = makepath!(homedir, ".config", tag);

                #[cfg(windows)]
                let base: PathBuf = makepath!(homedir, tag);

                base
            }
        };
        Ok(Self::with_basedir(tag, basedir))
    }

    /// Use a specific base directory instead of the per-user one.
    ///
    pub fn with_basedir(tag: &str, basedir: impl Into<PathBuf>) -> Self {
        ConfigFile {
            tag: String::from(tag),
            basedir: basedir.into(),
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(CONFIG);
        trace!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (base on $HOME or $LOCALAPPDATA)
    ///
    /// A missing default file is not an error, `T::default()` is used instead.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        ConfigFile::<T>::new(TAG)?.read(fname)
    }

    /// Read either the named file or the default one from our base directory.
    ///
    #[tracing::instrument(skip(self))]
    pub fn read(mut self, fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::Missing(fname.to_string_lossy().to_string()).into());
                }
                fname.to_path_buf()
            }
            None => {
                let def = self.default_file();
                if !def.exists() {
                    debug!("no {def:?}, using defaults for {}", self.tag);
                    return Ok(self);
                }
                def
            }
        };

        trace!("Loading config file {fname:?} from {:?}", self.config_path());

        let data = fs::read_to_string(&fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(ConfigError::BadVersion(data.version(), T::VERSION).into());
        }

        self.inner = data;
        Ok(self)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
