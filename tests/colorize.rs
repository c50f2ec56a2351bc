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
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tintforge::{
    colorize, create_colorizer_rgba, hsl_to_rgb, ColorScheme, Hsl, PaletteColor, TintConfig,
    TintImage, TintParameters, ToneStyle,
};

fn random_image(seed: u64, width: usize, height: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width * height * 4];
    rng.fill(data.as_mut_slice());
    // make sure every alpha class shows up
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        match i % 5 {
            0 => px[3] = 0,
            1 => px[3] = 255,
            _ => {}
        }
    }
    data
}

fn every_config() -> Vec<TintConfig> {
    let mut configs = Vec::new();
    for scheme in ColorScheme::ALL {
        for tone in ToneStyle::ALL {
            for color in [PaletteColor::Teal, PaletteColor::Rose, PaletteColor::Charcoal] {
                configs.push(TintConfig::new(color.rgb(), 0.65, scheme, tone).unwrap());
            }
        }
    }
    configs
}

#[test]
fn alpha_is_preserved_and_transparent_pixels_zeroed() {
    let data = random_image(1, 31, 17);
    let image = TintImage::borrow(&data, 31, 17);
    for config in every_config() {
        let out = colorize(&image, &config).unwrap();
        assert_eq!((out.width, out.height), (31, 17));
        let out = out.into_packed_vec();
        assert_eq!(out.len(), data.len());
        for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact(4)) {
            if src[3] == 0 {
                assert_eq!(dst, [0u8; 4]);
            } else {
                assert_eq!(dst[3], src[3]);
            }
        }
    }
}

#[test]
fn zero_intensity_is_identity() {
    let data = random_image(2, 24, 24);
    let image = TintImage::borrow(&data, 24, 24);
    for scheme in ColorScheme::ALL {
        let config = TintConfig::new(PaletteColor::Amber.rgb(), 0.0, scheme, ToneStyle::Bold)
            .unwrap();
        let out = colorize(&image, &config).unwrap().into_packed_vec();
        for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact(4)) {
            if src[3] != 0 {
                for c in 0..3 {
                    assert!((src[c] as i32 - dst[c] as i32).abs() <= 1);
                }
            }
        }
    }
}

#[test]
fn full_intensity_has_no_blending_residue() {
    let data = random_image(3, 16, 9);
    let image = TintImage::borrow(&data, 16, 9);
    for config in every_config() {
        let config = TintConfig { intensity: 1.0, ..config };
        let params = TintParameters::new(&config);
        let out = colorize(&image, &config).unwrap().into_packed_vec();
        for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact(4)) {
            if src[3] == 0 {
                continue;
            }
            let tinted = hsl_to_rgb(Hsl::new(
                params.hue,
                params.saturation,
                params.lightness(src[0], src[1], src[2]),
            ));
            assert_eq!(dst[..3], [tinted.r, tinted.g, tinted.b]);
        }
    }
}

#[test]
fn output_is_deterministic_and_source_untouched() {
    let data = random_image(4, 40, 13);
    let snapshot = data.clone();
    let image = TintImage::borrow(&data, 40, 13);
    let config = TintConfig::new(
        PaletteColor::Indigo.rgb(),
        0.42,
        ColorScheme::Vintage,
        ToneStyle::Soft,
    )
    .unwrap();
    let first = colorize(&image, &config).unwrap().into_packed_vec();
    let second = colorize(&image, &config).unwrap().into_packed_vec();
    assert_eq!(first, second);
    assert_eq!(data, snapshot);
}

#[test]
fn lane_api_matches_whole_image() {
    let data = random_image(5, 12, 6);
    let image = TintImage::borrow(&data, 12, 6);
    let config = TintConfig::new(PaletteColor::Lime.rgb(), 0.8, ColorScheme::Neon, ToneStyle::Bold)
        .unwrap();
    let whole = colorize(&image, &config).unwrap().into_packed_vec();

    let colorizer = create_colorizer_rgba(&config);
    let mut lanes = vec![0u8; data.len()];
    for (src, dst) in data.chunks_exact(12 * 4).zip(lanes.chunks_exact_mut(12 * 4)) {
        colorizer.colorize_lane(src, dst).unwrap();
    }
    assert_eq!(whole, lanes);
}

#[test]
fn transparent_single_pixel() {
    let data = [123u8, 45, 67, 0];
    let image = TintImage::borrow(&data, 1, 1);
    for config in every_config() {
        let out = colorize(&image, &config).unwrap();
        assert_eq!((out.width, out.height), (1, 1));
        assert_eq!(out.into_packed_vec(), vec![0, 0, 0, 0]);
    }
}

#[test]
fn hue_wraps_in_tint() {
    let config = TintConfig::default();
    let base = TintParameters::new(&config);
    let negative = TintParameters { hue: -30.0, ..base };
    let positive = TintParameters { hue: 330.0, ..base };
    let full_turn = TintParameters { hue: 360.0, ..base };
    let zero = TintParameters { hue: 0.0, ..base };
    for px in [[200u8, 200, 200, 255], [10, 90, 250, 128], [255, 0, 0, 3]] {
        assert_eq!(negative.apply(px), positive.apply(px));
        assert_eq!(full_turn.apply(px), zero.apply(px));
    }
}

#[test]
fn teal_scenario() {
    let data = [200u8, 200, 200, 255];
    let image = TintImage::borrow(&data, 1, 1);
    let full = TintConfig::from_hex("#2dd4bf", 1.0, ColorScheme::Single, ToneStyle::Normal)
        .unwrap();
    let tinted = colorize(&image, &full).unwrap().into_packed_vec();
    assert_eq!(tinted, vec![164, 236, 227, 255]);

    let half = TintConfig { intensity: 0.5, ..full };
    let blended = colorize(&image, &half).unwrap().into_packed_vec();
    assert_eq!(blended, vec![182, 218, 214, 255]);
}

fn reference_hsl(r8: u8, g8: u8, b8: u8) -> (f64, f64) {
    let (r, g, b) = (r8 as f64 / 255.0, g8 as f64 / 255.0, b8 as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    if d == 0.0 {
        return (0.0, 0.0);
    }
    let l = (max + min) / 2.0;
    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let sector = if max == r {
        ((g - b) / d) % 6.0
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }
    (h, s)
}

fn reference_pixel(px: [u8; 4], config: &TintConfig) -> [u8; 4] {
    if px[3] == 0 {
        return [0; 4];
    }
    let scheme = config.scheme.parameters();
    let tone = config.tone.parameters();
    let (base_h, base_s) = reference_hsl(config.base.r, config.base.g, config.base.b);
    let s = (base_s * scheme.saturation * tone.saturation).clamp(0.0, 1.0);
    let contrast = scheme.contrast * tone.contrast;
    let mut h = (base_h + scheme.hue_shift) % 360.0;
    if h < 0.0 {
        h += 360.0;
    }

    let lum = ((0.2126 * px[0] as f64 + 0.7152 * px[1] as f64 + 0.0722 * px[2] as f64) / 255.0)
        .clamp(0.0, 1.0);
    let curved = (lum.powf(1.0 / scheme.gamma.max(0.0001)) + scheme.lift).clamp(0.0, 1.0);
    let l = ((curved - 0.5) * contrast + 0.5).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let tinted = [
        ((r1 + m) * 255.0).round(),
        ((g1 + m) * 255.0).round(),
        ((b1 + m) * 255.0).round(),
    ];
    let mut out = [0u8, 0, 0, px[3]];
    for ch in 0..3 {
        let from = px[ch] as f64;
        out[ch] = (from + (tinted[ch] - from) * config.intensity).round() as u8;
    }
    out
}

#[test]
fn matches_double_precision_reference() {
    let (width, height) = (64, 40);
    let data = random_image(0x5eed, width, height);
    let image = TintImage::borrow(&data, width, height);
    for scheme in ColorScheme::ALL {
        for tone in ToneStyle::ALL {
            for color in PaletteColor::ALL {
                for percent in [30u8, 50, 70, 100] {
                    let config =
                        TintConfig::new(color.rgb(), percent as f64 / 100.0, scheme, tone)
                            .unwrap();
                    let out = colorize(&image, &config).unwrap().into_packed_vec();
                    for (src, dst) in data.chunks_exact(4).zip(out.chunks_exact(4)) {
                        let expected = reference_pixel([src[0], src[1], src[2], src[3]], &config);
                        assert_eq!(
                            dst, expected,
                            "{scheme} {tone} {color} {percent}% on {src:?}"
                        );
                    }
                }
            }
        }
    }
}
