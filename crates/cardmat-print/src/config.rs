//! JSON configuration for mat generation.

use std::fs;
use std::path::{Path, PathBuf};

use cardmat_aruco::{BuiltinDictionary, ARUCO_MIP_36H12};
use cardmat_layout::LayoutSpec;
use serde::{Deserialize, Serialize};

use crate::page::{compose_page, MatPage, PageOptions, PageSpec};
use crate::PrintError;

fn default_dictionary() -> String {
    ARUCO_MIP_36H12.to_string()
}

fn default_label() -> Option<String> {
    Some("Place Card Here".to_string())
}

fn default_true() -> bool {
    true
}

fn default_png_dpi() -> f64 {
    300.0
}

fn default_output_stem() -> String {
    "card_scanning_mat".to_string()
}

/// Mat generation config. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatConfig {
    #[serde(default)]
    pub layout: LayoutSpec,
    #[serde(default)]
    pub page: PageSpec,
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
    #[serde(default = "default_label")]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub marker_labels: bool,
    #[serde(default = "default_png_dpi")]
    pub png_dpi: f64,
    #[serde(default = "default_output_stem")]
    pub output_stem: String,
}

impl Default for MatConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSpec::default(),
            page: PageSpec::default(),
            dictionary: default_dictionary(),
            label: default_label(),
            marker_labels: true,
            png_dpi: default_png_dpi(),
            output_stem: default_output_stem(),
        }
    }
}

impl MatConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PrintError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PrintError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn output_stem(&self) -> PathBuf {
        PathBuf::from(&self.output_stem)
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            page: self.page,
            label: self.label.clone(),
            marker_labels: self.marker_labels,
        }
    }

    /// Resolve the configured embedded dictionary.
    pub fn build_dictionary(&self) -> Result<BuiltinDictionary, PrintError> {
        Ok(BuiltinDictionary::by_name(&self.dictionary)?)
    }

    /// Resolve the dictionary and compose the page.
    pub fn build_page(&self) -> Result<MatPage, PrintError> {
        let dict = self.build_dictionary()?;
        compose_page(&dict, &self.layout, &self.page_options())
    }
}
