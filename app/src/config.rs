/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names looked up in the working directory when none is given.
const CONFIG_FILENAMES: &[&str] = &["tintforge.yml", "tintforge.yaml"];

pub const DEFAULT_MAX_FILE_BYTES: u64 = 15 * 1024 * 1024;
pub const DEFAULT_MAX_RENDER_SIZE: u32 = 1800;
pub const DEFAULT_THUMB_WIDTH: u32 = 840;
pub const DEFAULT_THUMB_HEIGHT: u32 = 560;
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Inputs above this size are rejected before decoding
    pub max_file_bytes: u64,
    pub max_render_width: u32,
    pub max_render_height: u32,
    pub thumb_max_width: u32,
    pub thumb_max_height: u32,
    pub jpeg_quality: u8,
    pub wall_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_render_width: DEFAULT_MAX_RENDER_SIZE,
            max_render_height: DEFAULT_MAX_RENDER_SIZE,
            thumb_max_width: DEFAULT_THUMB_WIDTH,
            thumb_max_height: DEFAULT_THUMB_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            wall_dir: PathBuf::from("wall"),
        }
    }
}

impl AppConfig {
    /// Zero limits fall back to defaults, quality is kept in `1..=100`.
    pub fn sanitize(mut self) -> Self {
        let defaults = AppConfig::default();
        if self.max_file_bytes == 0 {
            self.max_file_bytes = defaults.max_file_bytes;
        }
        if self.max_render_width == 0 {
            self.max_render_width = defaults.max_render_width;
        }
        if self.max_render_height == 0 {
            self.max_render_height = defaults.max_render_height;
        }
        if self.thumb_max_width == 0 {
            self.thumb_max_width = defaults.thumb_max_width;
        }
        if self.thumb_max_height == 0 {
            self.thumb_max_height = defaults.thumb_max_height;
        }
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if self.wall_dir.as_os_str().is_empty() {
            self.wall_dir = defaults.wall_dir;
        }
        self
    }

    pub fn from_yaml_str(contents: &str, path: &Path) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(contents).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(config.sanitize())
    }

    /// Loads `explicit` if given, otherwise the first config file found in
    /// `search_dir`, otherwise defaults.
    pub fn load(explicit: Option<&Path>, search_dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => CONFIG_FILENAMES
                .iter()
                .map(|name| search_dir.join(name))
                .find(|candidate| candidate.is_file()),
        };
        match source {
            Some(path) => {
                let contents = fs::read_to_string(&path).map_err(|e| AppError::Config {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                let config = Self::from_yaml_str(&contents, &path)?;
                Ok((config, Some(path)))
            }
            None => Ok((AppConfig::default(), None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config =
            AppConfig::from_yaml_str("max_file_bytes: 1024\n", Path::new("t.yml")).unwrap();
        assert_eq!(config.max_file_bytes, 1024);
        assert_eq!(config.max_render_width, DEFAULT_MAX_RENDER_SIZE);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn sanitizes_values() {
        let config = AppConfig::from_yaml_str(
            "max_render_width: 0\njpeg_quality: 0\nwall_dir: ''\n",
            Path::new("t.yml"),
        )
        .unwrap();
        assert_eq!(config.max_render_width, DEFAULT_MAX_RENDER_SIZE);
        assert_eq!(config.jpeg_quality, 1);
        assert_eq!(config.wall_dir, PathBuf::from("wall"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = AppConfig::from_yaml_str("max_file_bytes: [1, 2]", Path::new("bad.yml"));
        assert!(matches!(err, Err(AppError::Config { .. })));
    }

    #[test]
    fn discovers_config_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(source.is_none());

        std::fs::write(dir.path().join("tintforge.yml"), "thumb_max_width: 100\n").unwrap();
        let (config, source) = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.thumb_max_width, 100);
        assert_eq!(source, Some(dir.path().join("tintforge.yml")));
    }
}
