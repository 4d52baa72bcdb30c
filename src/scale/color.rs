//! Colors, colormaps and the sequential color scale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Create a color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend towards `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Ten distinguishable categorical colors.
pub const CATEGORY10: [Rgb; 10] = [
    Rgb::from_u32(0x1f77b4),
    Rgb::from_u32(0xff7f0e),
    Rgb::from_u32(0x2ca02c),
    Rgb::from_u32(0xd62728),
    Rgb::from_u32(0x9467bd),
    Rgb::from_u32(0x8c564b),
    Rgb::from_u32(0xe377c2),
    Rgb::from_u32(0x7f7f7f),
    Rgb::from_u32(0xbcbd22),
    Rgb::from_u32(0x17becf),
];

const VIRIDIS: [u32; 10] = [
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];

const PLASMA: [u32; 10] = [
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];

const INFERNO: [u32; 10] = [
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];

/// Sequential / diverging color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    #[default]
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Inferno colormap (perceptually uniform, dark to bright).
    Inferno,
    /// Rainbow/Spectral colormap (traditional, high contrast).
    Rainbow,
    /// Blue-White-Red diverging colormap.
    BlueRed,
}

impl ColorScheme {
    /// All schemes, in cycle order.
    pub const ALL: [ColorScheme; 5] = [
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Rainbow,
        Self::BlueRed,
    ];

    /// Get the next scheme in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Inferno,
            Self::Inferno => Self::Rainbow,
            Self::Rainbow => Self::BlueRed,
            Self::BlueRed => Self::Viridis,
        }
    }

    /// Get scheme name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Inferno => "Inferno",
            Self::Rainbow => "Rainbow",
            Self::BlueRed => "Blue-Red",
        }
    }

    /// Map a normalized value (0.0 to 1.0) to a color.
    pub fn color(self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Viridis => interpolate_stops(&VIRIDIS, t),
            Self::Plasma => interpolate_stops(&PLASMA, t),
            Self::Inferno => interpolate_stops(&INFERNO, t),
            Self::Rainbow => rainbow_color(t),
            Self::BlueRed => bluered_color(t),
        }
    }
}

/// Piecewise linear interpolation between evenly spaced stops.
fn interpolate_stops(stops: &[u32], t: f64) -> Rgb {
    let last = stops.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last.saturating_sub(1));
    let frac = pos - i as f64;
    Rgb::from_u32(stops[i]).lerp(Rgb::from_u32(stops[(i + 1).min(last)]), frac)
}

/// Hue sweep from blue (t = 0) to red (t = 1).
fn rainbow_color(t: f64) -> Rgb {
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = if h < 60.0 {
        (1.0, x, 0.0)
    } else if h < 120.0 {
        (x, 1.0, 0.0)
    } else if h < 180.0 {
        (0.0, 1.0, x)
    } else {
        (0.0, x, 1.0)
    };

    let to_u8 = |c: f64| (c * 255.0).round() as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

/// Blue → white → red.
fn bluered_color(t: f64) -> Rgb {
    let white = Rgb::new(255, 255, 255);
    if t < 0.5 {
        Rgb::new(0, 0, 255).lerp(white, t * 2.0)
    } else {
        white.lerp(Rgb::new(255, 0, 0), (t - 0.5) * 2.0)
    }
}

/// Maps a numeric domain onto a color scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    domain: (f64, f64),
    scheme: ColorScheme,
}

impl SequentialScale {
    /// Create a scale over `domain`.
    pub fn new(domain: (f64, f64), scheme: ColorScheme) -> Self {
        Self { domain, scheme }
    }

    /// The scheme in use.
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Position of `value` within the domain, in `[0, 1]`.
    ///
    /// A zero-width domain places everything at 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let width = d1 - d0;
        if width == 0.0 || !width.is_finite() || !value.is_finite() {
            return 0.5;
        }
        ((value - d0) / width).clamp(0.0, 1.0)
    }

    /// Color for `value`.
    pub fn color(&self, value: f64) -> Rgb {
        self.scheme.color(self.normalize(value))
    }
}
