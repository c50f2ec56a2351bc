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
#![allow(clippy::manual_clamp, clippy::excessive_precision)]
mod color;
mod colorizer;
mod err;
mod hsl;
mod presets;
mod tint_image;

pub use color::{format_hex_color, parse_hex_color, PaletteColor};
pub use colorizer::{
    colorize, colorize_into, create_colorizer_rgba, Colorizer, SyncColorizer, TintConfig,
    TintParameters,
};
pub use err::{MismatchedSize, TintError};
pub use hsl::{hsl_to_rgb, rgb_to_hsl, wrap_hue, Hsl};
pub use moxcms::Rgb;
pub use presets::{ColorScheme, SchemeParameters, ToneParameters, ToneStyle};
pub use tint_image::{BufferStore, TintImage, TintImageMut, RGBA_CHANNELS};

#[inline(always)]
pub(crate) fn m_clamp<T: num_traits::Float>(a: T, min: T, max: T) -> T {
    a.max(min).min(max)
}

#[inline(always)]
pub(crate) fn clamp01(a: f64) -> f64 {
    m_clamp(a, 0f64, 1f64)
}
