use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown bond strategy '{0}' (expected 'strategic', 'spatial' or 'neighbor-residues')")]
    UnknownStrategy(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// How candidate atom pairs are chosen before the distance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondStrategy {
    /// Only pairs within the same residue.
    #[default]
    Strategic,
    /// All pairs found through a spatial hash over every atom.
    Spatial,
    /// Intra-residue pairs plus all cross pairs of residues whose central
    /// atoms are close.
    NeighborResidues,
}

impl FromStr for BondStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strategic" => Ok(Self::Strategic),
            "spatial" | "brute-force" => Ok(Self::Spatial),
            "neighbor-residues" | "neighbour-residues" => Ok(Self::NeighborResidues),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for BondStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Strategic => "strategic",
                Self::Spatial => "spatial",
                Self::NeighborResidues => "neighbor-residues",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParseConfig {
    pub first_model_only: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            first_model_only: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BondingConfig {
    pub strategy: BondStrategy,
    /// Central-atom distance (Å) under which two residues are bonding
    /// neighbours for [`BondStrategy::NeighborResidues`].
    pub neighbor_distance: f32,
}

impl Default for BondingConfig {
    fn default() -> Self {
        Self {
            strategy: BondStrategy::Strategic,
            neighbor_distance: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SecondaryConfig {
    /// Maximum backbone N–O distance (Å) for a hydrogen bond.
    pub hbond_cutoff: f32,
    /// Sheet partners must be more than this many residues apart.
    pub min_sheet_separation: usize,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            hbond_cutoff: 3.5,
            min_sheet_separation: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SoupConfig {
    pub parse: ParseConfig,
    pub bonding: BondingConfig,
    pub secondary: SecondaryConfig,
}

impl SoupConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bonding.neighbor_distance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "bonding.neighbor-distance",
                reason: format!("must be positive, got {}", self.bonding.neighbor_distance),
            });
        }
        if !(self.secondary.hbond_cutoff > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "secondary.hbond-cutoff",
                reason: format!("must be positive, got {}", self.secondary.hbond_cutoff),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SoupConfigBuilder {
    first_model_only: Option<bool>,
    strategy: Option<BondStrategy>,
    neighbor_distance: Option<f32>,
    hbond_cutoff: Option<f32>,
    min_sheet_separation: Option<usize>,
}

impl SoupConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_model_only(mut self, value: bool) -> Self {
        self.first_model_only = Some(value);
        self
    }
    pub fn bond_strategy(mut self, strategy: BondStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn neighbor_distance(mut self, distance: f32) -> Self {
        self.neighbor_distance = Some(distance);
        self
    }
    pub fn hbond_cutoff(mut self, cutoff: f32) -> Self {
        self.hbond_cutoff = Some(cutoff);
        self
    }
    pub fn min_sheet_separation(mut self, separation: usize) -> Self {
        self.min_sheet_separation = Some(separation);
        self
    }

    pub fn build(self) -> Result<SoupConfig, ConfigError> {
        let defaults = SoupConfig::default();
        let config = SoupConfig {
            parse: ParseConfig {
                first_model_only: self
                    .first_model_only
                    .unwrap_or(defaults.parse.first_model_only),
            },
            bonding: BondingConfig {
                strategy: self.strategy.unwrap_or(defaults.bonding.strategy),
                neighbor_distance: self
                    .neighbor_distance
                    .unwrap_or(defaults.bonding.neighbor_distance),
            },
            secondary: SecondaryConfig {
                hbond_cutoff: self
                    .hbond_cutoff
                    .unwrap_or(defaults.secondary.hbond_cutoff),
                min_sheet_separation: self
                    .min_sheet_separation
                    .unwrap_or(defaults.secondary.min_sheet_separation),
            },
        };
        config.validate()?;
        Ok(config)
    }
}
