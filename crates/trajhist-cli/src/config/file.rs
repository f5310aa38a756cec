use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileFrames {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub stride: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileProfileConfig {
    pub bin: Option<f64>,
    pub axis: Option<i64>,
    pub reference_density: Option<f64>,
    pub stats_start: Option<usize>,
    pub stats_end: Option<usize>,
    pub stats_stride: Option<usize>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileQuadrantConfig {
    pub tofile: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDensityFieldConfig {
    pub dl: Option<f64>,
    pub selection: Option<String>,
    /// `false` skips the volume store, like `--nohdf5`.
    pub store: Option<bool>,
    pub map2d: Option<i64>,
    pub axis: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub frames: Option<FileFrames>,
    pub profile: Option<FileProfileConfig>,
    pub quadrant: Option<FileQuadrantConfig>,
    pub density_field: Option<FileDensityFieldConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CliError::InputAccess {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sections_use_kebab_case_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trajhist.toml");
        fs::write(
            &path,
            r#"
            [frames]
            start = 2
            stride = 5

            [profile]
            bin = 0.25
            reference-density = 0.033
            stats-end = 10

            [density-field]
            dl = 2.0
            store = false
            map2d = 1
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.frames.unwrap().stride, Some(5));
        let profile = config.profile.unwrap();
        assert_eq!(profile.reference_density, Some(0.033));
        assert_eq!(profile.stats_end, Some(10));
        assert_eq!(config.density_field.unwrap().store, Some(false));
        assert!(config.quadrant.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[profile]\nbins = 3.0\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_access_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::InputAccess { .. })));
        assert_eq!(FileConfig::load(None).unwrap(), FileConfig::default());
    }
}
