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
use crate::TintError;
use std::fmt::Display;
use std::str::FromStr;

/// Stylistic constants of a [ColorScheme]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct SchemeParameters {
    /// Added to the base color hue, degrees
    pub hue_shift: f64,
    pub saturation: f64,
    pub contrast: f64,
    /// Lightness curve exponent, applied as `x^(1/gamma)`
    pub gamma: f64,
    /// Offset added to lightness after the gamma curve
    pub lift: f64,
}

/// Secondary multipliers of a [ToneStyle], layered on top of a scheme
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct ToneParameters {
    pub saturation: f64,
    pub contrast: f64,
}

/// Named stylistic preset for colorizing
#[derive(Debug, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColorScheme {
    /// Plain monochrome tint
    #[default]
    Single,
    Warm,
    Cool,
    Vintage,
    Morandi,
    Neon,
    Ink,
}

const SINGLE: SchemeParameters = SchemeParameters {
    hue_shift: 0f64,
    saturation: 1.0f64,
    contrast: 1.0f64,
    gamma: 1.0f64,
    lift: 0.0f64,
};

const WARM: SchemeParameters = SchemeParameters {
    hue_shift: 12f64,
    saturation: 1.05f64,
    contrast: 1.03f64,
    gamma: 0.98f64,
    lift: 0.02f64,
};

const COOL: SchemeParameters = SchemeParameters {
    hue_shift: -14f64,
    saturation: 1.02f64,
    contrast: 1.02f64,
    gamma: 1.02f64,
    lift: 0.015f64,
};

const VINTAGE: SchemeParameters = SchemeParameters {
    hue_shift: 18f64,
    saturation: 0.82f64,
    contrast: 0.96f64,
    gamma: 0.94f64,
    lift: 0.055f64,
};

const MORANDI: SchemeParameters = SchemeParameters {
    hue_shift: 8f64,
    saturation: 0.62f64,
    contrast: 0.98f64,
    gamma: 1.03f64,
    lift: 0.045f64,
};

const NEON: SchemeParameters = SchemeParameters {
    hue_shift: 0f64,
    saturation: 1.35f64,
    contrast: 1.08f64,
    gamma: 1.0f64,
    lift: 0.0f64,
};

const INK: SchemeParameters = SchemeParameters {
    hue_shift: -6f64,
    saturation: 0.9f64,
    contrast: 1.22f64,
    gamma: 1.05f64,
    lift: 0.0f64,
};

impl ColorScheme {
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Single,
        ColorScheme::Warm,
        ColorScheme::Cool,
        ColorScheme::Vintage,
        ColorScheme::Morandi,
        ColorScheme::Neon,
        ColorScheme::Ink,
    ];

    pub const fn parameters(self) -> SchemeParameters {
        match self {
            ColorScheme::Single => SINGLE,
            ColorScheme::Warm => WARM,
            ColorScheme::Cool => COOL,
            ColorScheme::Vintage => VINTAGE,
            ColorScheme::Morandi => MORANDI,
            ColorScheme::Neon => NEON,
            ColorScheme::Ink => INK,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            ColorScheme::Single => "single",
            ColorScheme::Warm => "warm",
            ColorScheme::Cool => "cool",
            ColorScheme::Vintage => "vintage",
            ColorScheme::Morandi => "morandi",
            ColorScheme::Neon => "neon",
            ColorScheme::Ink => "ink",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ColorScheme::Single => "Monochrome",
            ColorScheme::Warm => "Warm",
            ColorScheme::Cool => "Cool",
            ColorScheme::Vintage => "Vintage",
            ColorScheme::Morandi => "Morandi",
            ColorScheme::Neon => "Neon",
            ColorScheme::Ink => "Ink",
        }
    }

    /// Resolves an identifier, unknown ones fall back to [ColorScheme::Single]
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }
}

impl FromStr for ColorScheme {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| TintError::UnknownScheme(s.to_string()))
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Named secondary saturation/contrast strength
#[derive(Debug, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ToneStyle {
    Soft,
    #[default]
    Normal,
    Bold,
}

impl ToneStyle {
    pub const ALL: [ToneStyle; 3] = [ToneStyle::Soft, ToneStyle::Normal, ToneStyle::Bold];

    pub const fn parameters(self) -> ToneParameters {
        match self {
            ToneStyle::Soft => ToneParameters {
                saturation: 0.82f64,
                contrast: 0.98f64,
            },
            ToneStyle::Normal => ToneParameters {
                saturation: 1.0f64,
                contrast: 1.0f64,
            },
            ToneStyle::Bold => ToneParameters {
                saturation: 1.18f64,
                contrast: 1.04f64,
            },
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            ToneStyle::Soft => "soft",
            ToneStyle::Normal => "normal",
            ToneStyle::Bold => "bold",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ToneStyle::Soft => "Soft",
            ToneStyle::Normal => "Standard",
            ToneStyle::Bold => "Bold",
        }
    }

    /// Resolves an identifier, unknown ones fall back to [ToneStyle::Normal]
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }
}

impl FromStr for ToneStyle {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ToneStyle::ALL
            .into_iter()
            .find(|tone| tone.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| TintError::UnknownTone(s.to_string()))
    }
}

impl Display for ToneStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
