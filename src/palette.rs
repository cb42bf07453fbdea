//! HSB colours and the randomly generated palette glyphs draw from.

use rand::Rng;

/// Colour in hue/saturation/brightness space
///
/// Hue is in degrees `[0, 360)`, saturation and brightness in percent `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    pub const BLACK: Hsb = Hsb::new(0.0, 0.0, 0.0);
    pub const WHITE: Hsb = Hsb::new(0.0, 0.0, 100.0);

    pub const fn new(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Convert to RGBA with components in `[0, 1]`
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness / 100.0).clamp(0.0, 1.0);

        let chroma = v * s;
        let x = chroma * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - chroma;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        [r + m, g + m, b + m, alpha.clamp(0.0, 1.0)]
    }
}

/// Set of bold colours sharing one random base hue
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colours: Vec<Hsb>,
}

impl Palette {
    /// Generate `count` colours with widely varying hue, high saturation
    /// (80-99) and mid-to-high brightness (50-89).
    pub fn generate<R: Rng>(rng: &mut R, count: usize) -> Self {
        let base_hue = rng.random_range(0..360) as f32;

        let colours = (0..count.max(1))
            .map(|_| {
                let hue = (base_hue + rng.random_range(0.0f32..360.0)) % 360.0;
                let saturation = rng.random_range(80..100) as f32;
                let brightness = rng.random_range(50..90) as f32;
                Hsb::new(hue, saturation, brightness)
            })
            .collect();

        Self { colours }
    }

    /// Uniformly chosen colour
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Hsb {
        self.colours[rng.random_range(0..self.colours.len())]
    }

    /// Colour at `index`, wrapping around the palette
    pub fn cycled(&self, index: usize) -> Hsb {
        self.colours[index % self.colours.len()]
    }

    /// Background colour
    pub fn first(&self) -> Hsb {
        self.colours[0]
    }

    pub fn colours(&self) -> &[Hsb] {
        &self.colours
    }
}
