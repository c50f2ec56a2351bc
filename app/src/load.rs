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
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use image::imageops::FilterType;
use image::ImageFormat;
use std::fs;
use std::path::Path;
use tintforge::TintImage;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Decoded source, already fitted into the render limits
pub struct LoadedImage {
    pub pixels: TintImage<'static>,
    pub format: ImageFormat,
    pub file_name: String,
    pub file_size: u64,
    pub source_width: u32,
    pub source_height: u32,
}

/// Largest size not exceeding `max_width` x `max_height` keeping aspect ratio,
/// never upscales and never returns a zero side.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = 1f64
        .min(max_width as f64 / width.max(1) as f64)
        .min(max_height as f64 / height.max(1) as f64);
    let fitted_width = ((width as f64 * scale).round() as u32).max(1);
    let fitted_height = ((height as f64 * scale).round() as u32).max(1);
    (fitted_width, fitted_height)
}

pub fn looks_like_image_name(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Reads, validates and decodes an image file into RGBA8.
pub fn load_image(path: &Path, config: &AppConfig) -> Result<LoadedImage> {
    let file_size = fs::metadata(path).map_err(AppError::io(path))?.len();
    check_file_size(path, file_size, config)?;
    let bytes = fs::read(path).map_err(AppError::io(path))?;
    decode_image(&bytes, path, config)
}

fn check_file_size(path: &Path, size: u64, config: &AppConfig) -> Result<()> {
    if size > config.max_file_bytes {
        return Err(AppError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_bytes,
        });
    }
    Ok(())
}

/// Validates and decodes an already read image, `path` names its origin.
pub fn decode_image(bytes: &[u8], path: &Path, config: &AppConfig) -> Result<LoadedImage> {
    let file_size = bytes.len() as u64;
    check_file_size(path, file_size, config)?;

    let format = match image::guess_format(bytes) {
        Ok(format) => format,
        Err(_) if looks_like_image_name(path) => {
            ImageFormat::from_path(path).map_err(|source| AppError::Decode {
                path: path.to_path_buf(),
                source,
            })?
        }
        Err(_) => {
            return Err(AppError::NotAnImage {
                path: path.to_path_buf(),
            })
        }
    };

    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|source| {
        AppError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let (source_width, source_height) = (decoded.width(), decoded.height());
    let (width, height) = fit_within(
        source_width,
        source_height,
        config.max_render_width,
        config.max_render_height,
    );
    let fitted = if (width, height) != (source_width, source_height) {
        tracing::debug!(
            "downscaling {}x{} to {}x{}",
            source_width,
            source_height,
            width,
            height
        );
        decoded.resize_exact(width, height, FilterType::Triangle)
    } else {
        decoded
    };

    let rgba = fitted.to_rgba8();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(LoadedImage {
        pixels: TintImage::from_vec(rgba.into_raw(), width as usize, height as usize),
        format,
        file_name,
        file_size,
        source_width,
        source_height,
    })
}

/// Human readable byte count, `1.5 MB` style.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024f64 && unit < UNITS.len() - 1 {
        value /= 1024f64;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn fit_within_limits() {
        assert_eq!(fit_within(3600, 1800, 1800, 1800), (1800, 900));
        assert_eq!(fit_within(100, 50, 1800, 1800), (100, 50));
        assert_eq!(fit_within(1000, 3000, 840, 560), (187, 560));
        assert_eq!(fit_within(10000, 1, 100, 100), (100, 1));
        assert_eq!(fit_within(0, 0, 100, 100), (1, 1));
    }

    #[test]
    fn image_names() {
        assert!(looks_like_image_name(Path::new("a/b/photo.JPG")));
        assert!(looks_like_image_name(Path::new("x.webp")));
        assert!(!looks_like_image_name(Path::new("notes.txt")));
        assert!(!looks_like_image_name(Path::new("png")));
    }

    #[test]
    fn formats_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(15 * 1024 * 1024), "15.0 MB");
    }

    #[test]
    fn rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello there").unwrap();
        let err = load_image(&path, &AppConfig::default());
        assert!(matches!(err, Err(AppError::NotAnImage { .. })));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        fs::write(&path, vec![0u8; 2048]).unwrap();
        let config = AppConfig {
            max_file_bytes: 1024,
            ..AppConfig::default()
        };
        let err = load_image(&path, &config);
        assert!(matches!(
            err,
            Err(AppError::FileTooLarge {
                size: 2048,
                limit: 1024,
                ..
            })
        ));
    }

    #[test]
    fn decodes_and_downscales() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(40, 20, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let config = AppConfig {
            max_render_width: 20,
            max_render_height: 20,
            ..AppConfig::default()
        };
        let loaded = load_image(&path, &config).unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!((loaded.source_width, loaded.source_height), (40, 20));
        assert_eq!((loaded.pixels.width, loaded.pixels.height), (20, 10));
        let px = loaded.pixels.pixel(3, 3).unwrap();
        for (got, want) in px.iter().zip([10u8, 20, 30, 255]) {
            assert!((*got as i32 - want as i32).abs() <= 1, "{px:?}");
        }
        assert_eq!(loaded.file_name, "wide.png");
    }
}
