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
use moxcms::Rgb;

/// HSL color, hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Wraps any finite angle into `[0, 360)`.
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360f64);
    // tiny negative inputs round up to exactly 360
    if wrapped >= 360f64 {
        0f64
    } else {
        wrapped
    }
}

/// Converts 8-bit RGB into HSL.
///
/// Achromatic colors have hue and saturation of zero.
pub fn rgb_to_hsl(rgb: Rgb<u8>) -> Hsl {
    let r = rgb.r as f64 / 255f64;
    let g = rgb.g as f64 / 255f64;
    let b = rgb.b as f64 / 255f64;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let l = (max + min) * 0.5f64;

    if d == 0f64 {
        return Hsl { h: 0f64, s: 0f64, l };
    }

    let s = d / (1f64 - (2f64 * l - 1f64).abs());
    let sector = if max == r {
        ((g - b) / d) % 6f64
    } else if max == g {
        (b - r) / d + 2f64
    } else {
        (r - g) / d + 4f64
    };
    let mut h = sector * 60f64;
    if h < 0f64 {
        h += 360f64;
    }

    Hsl { h, s, l }
}

/// Converts HSL into 8-bit RGB using the six-sector chroma construction.
///
/// Hue is wrapped, channels are rounded to nearest and saturated into `[0, 255]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb<u8> {
    let l = hsl.l;
    let c = (1f64 - (2f64 * l - 1f64).abs()) * hsl.s;
    let hp = wrap_hue(hsl.h) / 60f64;
    let x = c * (1f64 - ((hp % 2f64) - 1f64).abs());

    let (r1, g1, b1) = if hp < 1f64 {
        (c, x, 0f64)
    } else if hp < 2f64 {
        (x, c, 0f64)
    } else if hp < 3f64 {
        (0f64, c, x)
    } else if hp < 4f64 {
        (0f64, x, c)
    } else if hp < 5f64 {
        (x, 0f64, c)
    } else {
        (c, 0f64, x)
    };

    let m = l - c * 0.5f64;
    Rgb::new(
        ((r1 + m) * 255f64).round() as u8,
        ((g1 + m) * 255f64).round() as u8,
        ((b1 + m) * 255f64).round() as u8,
    )
}
