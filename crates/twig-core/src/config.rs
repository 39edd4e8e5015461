use crate::builder::BuildOptions;
use crate::error::Result;
use crate::expander::ExpandLimits;
use crate::formatter::FormatOptions;
use crate::scanner::{compile_ignore, ScanOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".twig.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TwigConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwigConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub expand: ExpandLimits,
    #[serde(default)]
    pub build: BuildOptions,
    #[serde(default)]
    pub format: FormatOptions,
    #[serde(default)]
    pub scan: ScanOptions,
}

fn default_version() -> u32 {
    1
}

impl Default for TwigConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            expand: ExpandLimits::default(),
            build: BuildOptions::default(),
            format: FormatOptions::default(),
            scan: ScanOptions::default(),
        }
    }
}

impl TwigConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: TwigConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self.to_yaml()?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load the effective configuration.
    ///
    /// Priority:
    /// 1. `explicit` (`--config` / `TWIG_CONFIG`); it must exist
    /// 2. `.twig.yaml` in `cwd` or any ancestor
    /// 3. `~/.twig.yaml`
    /// 4. Built-in defaults
    ///
    /// Returns the config and the file it came from, if any.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let found = find_upward(cwd).or_else(|| {
            home::home_dir()
                .map(|h| h.join(CONFIG_FILE))
                .filter(|p| p.is_file())
        });

        match found {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Ok((Self::load(&path)?, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("unknown config version {}", self.version),
            });
        }

        if self.expand.max_depth == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "expand.max_depth is 0: every pattern containing braces will fail"
                    .to_string(),
            });
        }

        if self.expand.max_results == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "expand.max_results is 0: expansion output is unbounded".to_string(),
            });
        }

        if self.build.overwrite && self.build.skip_existing {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "build.overwrite has no effect while build.skip_existing is set"
                    .to_string(),
            });
        }

        if self.build.dry_run {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "build.dry_run is set: builds will never write to disk".to_string(),
            });
        }

        for pattern in &self.scan.ignore {
            if let Err(e) = compile_ignore(pattern) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("scan.ignore: {e}"),
                });
            }
        }

        warnings
    }
}

/// Walk upward from `start` looking for [`CONFIG_FILE`].
pub fn find_upward(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}
