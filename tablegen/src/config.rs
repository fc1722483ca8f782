//! TOML Configuration for the Table Generator
//!
//! Mirrors the numerology section of the cell configuration so tables can be
//! regenerated from the same file the deployment is driven by.

use anyhow::{Context, Result};
use phy::{FrequencyTableRequest, TimingTableRequest};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level table-generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TablegenConfig {
    /// Timing-alignment table parameters
    #[serde(default)]
    pub ta: TaTableConfig,
    /// Frequency-offset table parameters
    #[serde(default)]
    pub fo: FoTableConfig,
}

impl TablegenConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

impl Default for TablegenConfig {
    fn default() -> Self {
        Self {
            ta: TaTableConfig::default(),
            fo: FoTableConfig::default(),
        }
    }
}

/// Timing-alignment table parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaTableConfig {
    /// FFT length
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    /// Maximum timing offset magnitude in samples
    #[serde(default = "default_cp_len")]
    pub cyclic_prefix_len: usize,
    /// Number of active subcarriers
    #[serde(default = "default_num_subcarriers")]
    pub num_subcarriers: usize,
}

impl Default for TaTableConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            cyclic_prefix_len: default_cp_len(),
            num_subcarriers: default_num_subcarriers(),
        }
    }
}

impl TaTableConfig {
    pub fn to_request(&self) -> TimingTableRequest {
        TimingTableRequest {
            fft_size: self.fft_size,
            cyclic_prefix_len: self.cyclic_prefix_len,
            num_subcarriers: self.num_subcarriers,
        }
    }
}

/// Frequency-offset table parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FoTableConfig {
    /// FFT length
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
}

impl Default for FoTableConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
        }
    }
}

impl FoTableConfig {
    pub fn to_request(&self) -> FrequencyTableRequest {
        FrequencyTableRequest {
            fft_size: self.fft_size,
        }
    }
}

fn default_fft_size() -> usize {
    // 10 MHz at 15 kHz SCS
    1024
}

fn default_cp_len() -> usize {
    // Normal CP scaled to a 1024-point FFT
    72
}

fn default_num_subcarriers() -> usize {
    // 52 resource blocks
    624
}
