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
use moxcms::Rgb;
use std::fmt::Display;
use std::str::FromStr;

/// Parses `#rrggbb` or `rrggbb`, surrounding whitespace ignored.
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, TintError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TintError::InvalidColor(value.to_string()));
    }
    let channel = |at: usize| {
        u8::from_str_radix(&digits[at..at + 2], 16)
            .map_err(|_| TintError::InvalidColor(value.to_string()))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats as upper case `#RRGGBB`
pub fn format_hex_color(rgb: Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

/// Library of ready to use base colors
#[derive(Debug, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PaletteColor {
    #[default]
    Teal,
    Amber,
    Rose,
    Indigo,
    Lime,
    Sky,
    Coffee,
    Slate,
    Charcoal,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 9] = [
        PaletteColor::Teal,
        PaletteColor::Amber,
        PaletteColor::Rose,
        PaletteColor::Indigo,
        PaletteColor::Lime,
        PaletteColor::Sky,
        PaletteColor::Coffee,
        PaletteColor::Slate,
        PaletteColor::Charcoal,
    ];

    pub fn rgb(self) -> Rgb<u8> {
        match self {
            PaletteColor::Teal => Rgb::new(0x2d, 0xd4, 0xbf),
            PaletteColor::Amber => Rgb::new(0xf5, 0x9e, 0x0b),
            PaletteColor::Rose => Rgb::new(0xfb, 0x71, 0x85),
            PaletteColor::Indigo => Rgb::new(0x63, 0x66, 0xf1),
            PaletteColor::Lime => Rgb::new(0x84, 0xcc, 0x16),
            PaletteColor::Sky => Rgb::new(0x38, 0xbd, 0xf8),
            PaletteColor::Coffee => Rgb::new(0xa1, 0x62, 0x07),
            PaletteColor::Slate => Rgb::new(0x94, 0xa3, 0xb8),
            PaletteColor::Charcoal => Rgb::new(0x0f, 0x17, 0x2a),
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            PaletteColor::Teal => "teal",
            PaletteColor::Amber => "amber",
            PaletteColor::Rose => "rose",
            PaletteColor::Indigo => "indigo",
            PaletteColor::Lime => "lime",
            PaletteColor::Sky => "sky",
            PaletteColor::Coffee => "coffee",
            PaletteColor::Slate => "slate",
            PaletteColor::Charcoal => "charcoal",
        }
    }
}

impl FromStr for PaletteColor {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        PaletteColor::ALL
            .into_iter()
            .find(|color| color.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| TintError::InvalidColor(s.to_string()))
    }
}

impl Display for PaletteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
