use crate::predicate::Extensions;
use crate::scanner::Finder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub extensions: Extensions,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub sort: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: Extensions::default(),
            max_depth: None,
            follow_links: true,
            sort: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;

        let config: Config =
            serde_yaml::from_reader(file).context("Failed to parse configuration file")?;

        if config.extensions.is_empty() {
            anyhow::bail!("Configuration must list at least one extension");
        }

        Ok(config)
    }

    pub fn finder<P: AsRef<Path>>(&self, root: P) -> Finder {
        Finder::new(root)
            .extensions(self.extensions.clone())
            .max_depth(self.max_depth)
            .follow_links(self.follow_links)
            .sort(self.sort)
    }
}
