use crate::cli::LoadArgs;
use crate::error::{CliError, Result};
use pdbsoup::engine::config::{self as core_config, BondStrategy};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialParseConfig {
    #[serde(rename = "first-model-only")]
    first_model_only: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialBondingConfig {
    strategy: Option<BondStrategy>,
    #[serde(rename = "neighbor-distance")]
    neighbor_distance: Option<f32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSecondaryConfig {
    #[serde(rename = "hbond-cutoff")]
    hbond_cutoff: Option<f32>,
    #[serde(rename = "min-sheet-separation")]
    min_sheet_separation: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSoupConfig {
    parse: Option<PartialParseConfig>,
    bonding: Option<PartialBondingConfig>,
    secondary: Option<PartialSecondaryConfig>,
}

impl PartialSoupConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, if any, and merges it with the
    /// command line.
    pub fn resolve(args: &LoadArgs) -> Result<core_config::SoupConfig> {
        let partial = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        partial.merge_with_cli(args)
    }

    pub fn merge_with_cli(mut self, args: &LoadArgs) -> Result<core_config::SoupConfig> {
        self.apply_set_values(&args.set_values)?;

        let parse = self.parse.take().unwrap_or_default();
        let bonding = self.bonding.take().unwrap_or_default();
        let secondary = self.secondary.take().unwrap_or_default();

        let mut builder = core_config::SoupConfigBuilder::new();

        let strategy = match &args.bond_strategy {
            Some(name) => {
                Some(BondStrategy::from_str(name).map_err(|e| CliError::Config(e.to_string()))?)
            }
            None => bonding.strategy,
        };
        if let Some(strategy) = strategy {
            builder = builder.bond_strategy(strategy);
        }

        if args.all_models {
            builder = builder.first_model_only(false);
        } else if let Some(value) = parse.first_model_only {
            builder = builder.first_model_only(value);
        }

        if let Some(distance) = bonding.neighbor_distance {
            builder = builder.neighbor_distance(distance);
        }
        if let Some(cutoff) = secondary.hbond_cutoff {
            builder = builder.hbond_cutoff(cutoff);
        }
        if let Some(separation) = secondary.min_sheet_separation {
            builder = builder.min_sheet_separation(separation);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        if set_values.is_empty() {
            return Ok(());
        }
        for kv_pair in set_values {
            let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            }
            let key = parts[0].trim();
            let value_str = parts[1].trim();

            match key {
                "parse.first-model-only" => {
                    self.parse
                        .get_or_insert_with(Default::default)
                        .first_model_only = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "bonding.strategy" => {
                    self.bonding.get_or_insert_with(Default::default).strategy = Some(
                        BondStrategy::from_str(value_str)
                            .map_err(|e| CliError::Config(e.to_string()))?,
                    );
                }
                "bonding.neighbor-distance" => {
                    self.bonding
                        .get_or_insert_with(Default::default)
                        .neighbor_distance = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "secondary.hbond-cutoff" => {
                    self.secondary
                        .get_or_insert_with(Default::default)
                        .hbond_cutoff = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "secondary.min-sheet-separation" => {
                    self.secondary
                        .get_or_insert_with(Default::default)
                        .min_sheet_separation = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
