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
use crate::load::fit_within;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};
use tintforge::TintImageMut;

/// Output encodings, chosen from the source file type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    WebP,
}

impl ExportFormat {
    /// PNG and WebP sources keep their format, anything else becomes JPEG
    pub fn from_source(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => ExportFormat::Png,
            ImageFormat::WebP => ExportFormat::WebP,
            _ => ExportFormat::Jpeg,
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if ext.contains("png") {
            ExportFormat::Png
        } else if ext.contains("webp") {
            ExportFormat::WebP
        } else {
            ExportFormat::Jpeg
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::WebP => "webp",
        }
    }
}

/// File stem safe for any file system, `image` when nothing usable is left.
pub fn safe_base_name(file_name: &str) -> String {
    let normalized = file_name.replace('\\', "/");
    let last = normalized.rsplit('/').next().unwrap_or_default();
    let stem = match last.rfind('.') {
        Some(dot) if dot + 1 < last.len() => &last[..dot],
        _ => last,
    };

    let mut cleaned = String::with_capacity(stem.len());
    for c in stem.chars() {
        let keep = c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-';
        let c = if keep { c } else { '-' };
        if c == '-' && cleaned.ends_with('-') {
            continue;
        }
        cleaned.push(c);
    }

    let trimmed = cleaned.trim_matches(|c| c == '-' || c == '.');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{base}-{suffix}.{ext}`
pub fn output_file_name(original_name: &str, suffix: &str, format: ExportFormat) -> String {
    format!(
        "{}-{}.{}",
        safe_base_name(original_name),
        suffix,
        format.extension()
    )
}

/// Display title, shortened to 40 characters.
pub fn safe_title(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "Untitled".to_string();
    }
    if trimmed.chars().count() > 40 {
        let head: String = trimmed.chars().take(37).collect();
        return format!("{head}...");
    }
    trimmed.to_string()
}

pub fn to_rgba_image(colorized: TintImageMut<'_>) -> Result<RgbaImage> {
    let (width, height) = (colorized.width, colorized.height);
    RgbaImage::from_raw(width as u32, height as u32, colorized.into_packed_vec())
        .ok_or(AppError::BufferLayout { width, height })
}

pub fn thumbnail(image: &RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (width, height) = fit_within(image.width(), image.height(), max_width, max_height);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    image::imageops::resize(image, width, height, FilterType::Triangle)
}

/// Encodes into `format`, JPEG drops alpha.
pub fn encode(image: &RgbaImage, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();
    let encoded = match format {
        ExportFormat::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::WebP => WebPEncoder::new_lossless(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    encoded.map_err(|source| AppError::Encode {
        format: format.extension(),
        source,
    })?;
    Ok(bytes)
}
