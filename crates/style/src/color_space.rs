//! Conversions from the CSS Color 4 perceptual spaces into gamut-clamped sRGB.
//!
//! OKLab and OKLCH are defined against D65; CIE Lab and LCH against D50 and are
//! chromatically adapted with the Bradford transform before the sRGB matrix.

use srsforge_types::Color;

const D50_WHITE: [f64; 3] = [0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

const BRADFORD_D50_TO_D65: [[f64; 3]; 3] = [
    [0.955_473_452_704_218_2, -0.023_098_536_874_261_423, 0.063_259_308_661_021_7],
    [-0.028_369_706_963_208_136, 1.009_995_458_010_662_9, 0.021_041_398_966_943_008],
    [0.012_314_001_688_319_899, -0.020_507_696_433_477_912, 1.330_365_936_608_075_3],
];

const XYZ_D65_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.240_969_941_904_522_6, -1.537_383_177_570_094, -0.498_610_760_293_003_4],
    [-0.969_243_636_280_879_6, 1.875_967_501_507_720_2, 0.041_555_057_407_175_59],
    [0.055_630_079_696_993_66, -0.203_976_958_888_976_52, 1.056_971_514_242_878_6],
];

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn gamma_encode(linear: f64) -> f64 {
    let magnitude = linear.abs();
    let encoded = if magnitude <= 0.003_130_8 {
        12.92 * magnitude
    } else {
        1.055 * magnitude.powf(1.0 / 2.4) - 0.055
    };
    encoded.copysign(linear)
}

fn to_srgb_color(linear: [f64; 3], alpha: f32) -> Color {
    let channel = |v: f64| {
        let encoded = gamma_encode(v);
        if encoded.is_nan() {
            0
        } else {
            (encoded.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };
    Color::rgba(channel(linear[0]), channel(linear[1]), channel(linear[2]), alpha)
}

fn polar_to_cartesian(chroma: f32, hue_degrees: f32) -> (f32, f32) {
    let hue = (hue_degrees as f64).to_radians();
    let chroma = (chroma as f64).max(0.0);
    ((chroma * hue.cos()) as f32, (chroma * hue.sin()) as f32)
}

/// `lightness` in `0.0..=1.0`.
pub fn oklab_to_srgb(lightness: f32, a: f32, b: f32, alpha: f32) -> Color {
    let (l, a, b) = (lightness as f64, a as f64, b as f64);

    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let (l3, m3, s3) = (l_.powi(3), m_.powi(3), s_.powi(3));

    let linear = [
        4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3,
        -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3,
        -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701_0 * s3,
    ];
    to_srgb_color(linear, alpha)
}

pub fn oklch_to_srgb(lightness: f32, chroma: f32, hue_degrees: f32, alpha: f32) -> Color {
    let (a, b) = polar_to_cartesian(chroma, hue_degrees);
    oklab_to_srgb(lightness, a, b, alpha)
}

/// CIE Lab with `lightness` in `0.0..=100.0`, D50 reference white.
pub fn lab_to_srgb(lightness: f32, a: f32, b: f32, alpha: f32) -> Color {
    let (l, a, b) = (lightness as f64, a as f64, b as f64);

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let inverse = |f: f64| {
        let cubed = f.powi(3);
        if cubed > LAB_EPSILON {
            cubed
        } else {
            (116.0 * f - 16.0) / LAB_KAPPA
        }
    };
    let yr = if l > LAB_KAPPA * LAB_EPSILON {
        fy.powi(3)
    } else {
        l / LAB_KAPPA
    };

    let xyz_d50 = [
        inverse(fx) * D50_WHITE[0],
        yr * D50_WHITE[1],
        inverse(fz) * D50_WHITE[2],
    ];
    let xyz_d65 = mul(&BRADFORD_D50_TO_D65, xyz_d50);
    to_srgb_color(mul(&XYZ_D65_TO_LINEAR_SRGB, xyz_d65), alpha)
}

pub fn lch_to_srgb(lightness: f32, chroma: f32, hue_degrees: f32, alpha: f32) -> Color {
    let (a, b) = polar_to_cartesian(chroma, hue_degrees);
    lab_to_srgb(lightness, a, b, alpha)
}
