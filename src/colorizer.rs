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
use crate::color::parse_hex_color;
use crate::hsl::{hsl_to_rgb, rgb_to_hsl, wrap_hue, Hsl};
use crate::presets::{ColorScheme, ToneStyle};
use crate::tint_image::{TintImage, TintImageMut, RGBA_CHANNELS};
use crate::{clamp01, PaletteColor, TintError};
use moxcms::Rgb;

const LUMA_PRIMARIES: [f64; 3] = [0.2126f64, 0.7152f64, 0.0722f64];
const MIN_GAMMA: f64 = 0.0001f64;

/// What to tint toward and how strongly
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TintConfig {
    pub base: Rgb<u8>,
    /// Blend fraction between source and fully tinted color, `[0, 1]`
    pub intensity: f64,
    pub scheme: ColorScheme,
    pub tone: ToneStyle,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            base: PaletteColor::Teal.rgb(),
            intensity: 0.7f64,
            scheme: ColorScheme::Single,
            tone: ToneStyle::Normal,
        }
    }
}

impl TintConfig {
    /// Intensity is clamped into `[0, 1]`, non finite values are rejected.
    pub fn new(
        base: Rgb<u8>,
        intensity: f64,
        scheme: ColorScheme,
        tone: ToneStyle,
    ) -> Result<Self, TintError> {
        if !intensity.is_finite() {
            return Err(TintError::InvalidIntensity(intensity));
        }
        Ok(Self {
            base,
            intensity: clamp01(intensity),
            scheme,
            tone,
        })
    }

    /// Same as [TintConfig::new] with the base color given as `#rrggbb`.
    pub fn from_hex(
        hex: &str,
        intensity: f64,
        scheme: ColorScheme,
        tone: ToneStyle,
    ) -> Result<Self, TintError> {
        let base = parse_hex_color(hex)?;
        Self::new(base, intensity, scheme, tone)
    }
}

/// Per image constants derived from a [TintConfig]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TintParameters {
    pub hue: f64,
    pub saturation: f64,
    pub contrast: f64,
    pub gamma: f64,
    pub lift: f64,
    pub intensity: f64,
}

impl TintParameters {
    pub fn new(config: &TintConfig) -> Self {
        let scheme = config.scheme.parameters();
        let tone = config.tone.parameters();
        let base = rgb_to_hsl(config.base);
        Self {
            hue: wrap_hue(base.h + scheme.hue_shift),
            saturation: clamp01(base.s * scheme.saturation * tone.saturation),
            contrast: scheme.contrast * tone.contrast,
            gamma: scheme.gamma.max(MIN_GAMMA),
            lift: scheme.lift,
            intensity: clamp01(config.intensity),
        }
    }

    /// BT.709 luminance pushed through the gamma/lift curve and contrast.
    #[inline]
    pub fn lightness(&self, r: u8, g: u8, b: u8) -> f64 {
        let weighted = LUMA_PRIMARIES[0] * r as f64
            + LUMA_PRIMARIES[1] * g as f64
            + LUMA_PRIMARIES[2] * b as f64;
        let luminance = clamp01(weighted / 255f64);
        let curved = clamp01(luminance.powf(1f64 / self.gamma) + self.lift);
        clamp01((curved - 0.5f64) * self.contrast + 0.5f64)
    }

    /// Fully tinted color for a source pixel, ignoring intensity.
    #[inline]
    pub fn tint(&self, r: u8, g: u8, b: u8) -> Rgb<u8> {
        hsl_to_rgb(Hsl {
            h: self.hue,
            s: self.saturation,
            l: self.lightness(r, g, b),
        })
    }

    /// Colorizes one RGBA pixel.
    #[inline]
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        if px[3] == 0 {
            return [0u8; 4];
        }
        let tinted = self.tint(px[0], px[1], px[2]);
        [
            mix8(px[0], tinted.r, self.intensity),
            mix8(px[1], tinted.g, self.intensity),
            mix8(px[2], tinted.b, self.intensity),
            px[3],
        ]
    }
}

#[inline(always)]
fn mix8(from: u8, to: u8, t: f64) -> u8 {
    let from = from as f64;
    (from + (to as f64 - from) * t).round() as u8
}

pub trait Colorizer {
    /// Colorizes interleaved RGBA lane.
    ///
    /// Lane length must be multiple of channels.
    /// Lane length must match.
    fn colorize_lane(&self, src: &[u8], dst: &mut [u8]) -> Result<(), TintError>;
}

pub type SyncColorizer = dyn Colorizer + Send + Sync;

struct RgbaColorizer {
    params: TintParameters,
}

impl Colorizer for RgbaColorizer {
    fn colorize_lane(&self, src: &[u8], dst: &mut [u8]) -> Result<(), TintError> {
        if src.len() != dst.len() {
            return Err(TintError::LaneSizeMismatch);
        }
        if src.len() % RGBA_CHANNELS != 0 {
            return Err(TintError::LaneMultipleOfChannels);
        }
        for (src, dst) in src
            .chunks_exact(RGBA_CHANNELS)
            .zip(dst.chunks_exact_mut(RGBA_CHANNELS))
        {
            let px = self.params.apply([src[0], src[1], src[2], src[3]]);
            dst.copy_from_slice(&px);
        }
        Ok(())
    }
}

/// Creates RGBA8 colorizer
///
/// # Arguments
///
/// * `config`: see [TintConfig]
///
/// returns: Box<dyn Colorizer + Send + Sync>
pub fn create_colorizer_rgba(config: &TintConfig) -> Box<SyncColorizer> {
    Box::new(RgbaColorizer {
        params: TintParameters::new(config),
    })
}

/// Colorizes `src` into caller provided `dst` of the same size.
pub fn colorize_into(
    src: &TintImage<'_>,
    dst: &mut TintImageMut<'_>,
    config: &TintConfig,
) -> Result<(), TintError> {
    src.check_layout()?;
    dst.check_layout()?;
    src.size_matches_mut(dst)?;

    let colorizer = RgbaColorizer {
        params: TintParameters::new(config),
    };
    let lane_length = src.width * RGBA_CHANNELS;
    let src_stride = src.row_stride();
    let dst_stride = dst.row_stride();
    let height = src.height;
    let src_data: &[u8] = src.data.as_ref();
    let dst_data = dst.data.borrow_mut();

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        dst_data
            .par_chunks_mut(dst_stride)
            .take(height)
            .zip(src_data.par_chunks(src_stride))
            .try_for_each(|(dst, src)| {
                colorizer.colorize_lane(&src[..lane_length], &mut dst[..lane_length])
            })?;
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (dst, src) in dst_data
            .chunks_mut(dst_stride)
            .take(height)
            .zip(src_data.chunks(src_stride))
        {
            colorizer.colorize_lane(&src[..lane_length], &mut dst[..lane_length])?;
        }
    }

    Ok(())
}

/// Colorizes RGBA image into a newly allocated one.
///
/// Pixels with zero alpha become `(0, 0, 0, 0)`, other pixels keep their alpha.
/// The source is never modified.
pub fn colorize(
    image: &TintImage<'_>,
    config: &TintConfig,
) -> Result<TintImageMut<'static>, TintError> {
    image.check_layout()?;
    let mut dst = TintImageMut::alloc(image.width, image.height);
    colorize_into(image, &mut dst, config)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teal(intensity: f64) -> TintConfig {
        TintConfig::from_hex("#2dd4bf", intensity, ColorScheme::Single, ToneStyle::Normal)
            .unwrap()
    }

    #[test]
    fn teal_parameters() {
        let params = TintParameters::new(&teal(1f64));
        assert!((params.hue - 172.4f64).abs() < 0.1);
        assert!((params.saturation - 0.66f64).abs() < 0.01);
        assert_eq!(params.contrast, 1f64);
        assert_eq!(params.gamma, 1f64);
        assert_eq!(params.lift, 0f64);
    }

    #[test]
    fn gray_pixel_keeps_its_lightness() {
        let params = TintParameters::new(&teal(1f64));
        let l = params.lightness(200, 200, 200);
        assert!((l - 200f64 / 255f64).abs() < 1e-4, "{l}");
    }

    #[test]
    fn full_intensity_is_tinted_color() {
        let params = TintParameters::new(&teal(1f64));
        let tinted = hsl_to_rgb(Hsl::new(
            params.hue,
            params.saturation,
            params.lightness(200, 200, 200),
        ));
        let out = params.apply([200, 200, 200, 255]);
        assert_eq!(out, [tinted.r, tinted.g, tinted.b, 255]);
        // light teal
        assert!(out[1] > out[0] && out[2] > out[0]);
        assert_eq!(out, [164, 236, 227, 255]);
    }

    #[test]
    fn half_intensity_blends() {
        let full = TintParameters::new(&teal(1f64)).apply([200, 200, 200, 255]);
        let half = TintParameters::new(&teal(0.5f64)).apply([200, 200, 200, 255]);
        for c in 0..3 {
            let expected = (200f64 + (full[c] as f64 - 200f64) * 0.5f64).round() as u8;
            assert_eq!(half[c], expected);
        }
        assert_eq!(half[3], 255);
    }

    #[test]
    fn zero_alpha_is_zeroed() {
        let params = TintParameters::new(&teal(0.3f64));
        assert_eq!(params.apply([12, 200, 31, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn partial_alpha_is_tinted_like_opaque() {
        let params = TintParameters::new(&teal(1f64));
        let opaque = params.apply([90, 40, 10, 255]);
        let faint = params.apply([90, 40, 10, 1]);
        assert_eq!(opaque[..3], faint[..3]);
        assert_eq!(faint[3], 1);
    }

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(teal(3f64).intensity, 1f64);
        assert_eq!(teal(-1f64).intensity, 0f64);
        assert!(matches!(
            TintConfig::new(Rgb::new(1, 2, 3), f64::NAN, ColorScheme::Ink, ToneStyle::Soft),
            Err(TintError::InvalidIntensity(_))
        ));
    }

    #[test]
    fn invalid_color_fails_before_output() {
        assert_eq!(
            TintConfig::from_hex("teal", 1f64, ColorScheme::Single, ToneStyle::Normal),
            Err(TintError::InvalidColor("teal".to_string()))
        );
    }

    #[test]
    fn lane_checks() {
        let colorizer = create_colorizer_rgba(&teal(1f64));
        let src = [0u8; 8];
        let mut dst = [0u8; 4];
        assert_eq!(
            colorizer.colorize_lane(&src, &mut dst),
            Err(TintError::LaneSizeMismatch)
        );
        let mut odd = [0u8; 6];
        assert_eq!(
            colorizer.colorize_lane(&[0u8; 6], &mut odd),
            Err(TintError::LaneMultipleOfChannels)
        );
    }

    #[test]
    fn respects_strides() {
        // 1x2 image, source padded to 8 bytes per row
        let src_data = [200u8, 200, 200, 255, 7, 7, 7, 7, 10, 20, 30, 0];
        let mut src = TintImage::borrow(&src_data, 1, 2);
        src.stride = 8;
        let out = colorize(&src, &teal(1f64)).unwrap();
        let params = TintParameters::new(&teal(1f64));
        let out = out.into_packed_vec();
        assert_eq!(out[..4], params.apply([200, 200, 200, 255]));
        assert_eq!(out[4..], [0, 0, 0, 0]);
    }

    #[test]
    fn output_can_be_colorized_again() {
        let data = [200u8, 200, 200, 255, 30, 60, 90, 128];
        let src = TintImage::borrow(&data, 2, 1);
        let once = colorize(&src, &teal(1f64)).unwrap();
        let twice = colorize(&once.to_immutable_ref(), &teal(1f64)).unwrap();
        let params = TintParameters::new(&teal(1f64));
        let once = once.into_packed_vec();
        let twice = twice.into_packed_vec();
        assert_eq!(twice[..4], params.apply([once[0], once[1], once[2], once[3]]));
        assert_eq!(twice[7], 128);
    }

    #[test]
    fn rejects_size_mismatch() {
        let src = TintImage::alloc(2, 2);
        let mut dst = TintImageMut::alloc(2, 3);
        assert_eq!(
            colorize_into(&src, &mut dst, &TintConfig::default()),
            Err(TintError::ImageSizeMismatch)
        );
    }
}
