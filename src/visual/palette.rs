#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Eight stepped colors, leftmost bar first.
pub struct Palette {
    pub name: &'static str,
    pub colors: [Rgb; 8],
}

impl Palette {
    /// Color for bar `index` of `band_count`: `floor(index / band_count * len)`,
    /// clamped to the last slot. No interpolation between slots.
    pub fn color_for(&self, index: usize, band_count: usize) -> Rgb {
        let len = self.colors.len();
        let ratio = index as f64 / band_count.max(1) as f64;
        let slot = ((ratio * len as f64) as usize).min(len - 1);
        self.colors[slot]
    }
}

pub const PALETTES: [Palette; 4] = [
    Palette {
        name: "Bass Heavy",
        colors: [
            Rgb::new(255, 0, 0),
            Rgb::new(255, 50, 0),
            Rgb::new(255, 100, 0),
            Rgb::new(255, 150, 0),
            Rgb::new(255, 200, 0),
            Rgb::new(255, 255, 0),
            Rgb::new(200, 255, 0),
            Rgb::new(150, 255, 0),
        ],
    },
    Palette {
        name: "Neon",
        colors: [
            Rgb::new(128, 0, 255),
            Rgb::new(150, 0, 255),
            Rgb::new(200, 0, 255),
            Rgb::new(255, 0, 200),
            Rgb::new(255, 0, 150),
            Rgb::new(255, 0, 100),
            Rgb::new(0, 150, 255),
            Rgb::new(0, 255, 255),
        ],
    },
    Palette {
        name: "Fire",
        colors: [
            Rgb::new(139, 0, 0),
            Rgb::new(178, 34, 34),
            Rgb::new(220, 20, 60),
            Rgb::new(255, 69, 0),
            Rgb::new(255, 140, 0),
            Rgb::new(255, 165, 0),
            Rgb::new(255, 215, 0),
            Rgb::new(255, 255, 255),
        ],
    },
    Palette {
        name: "Ocean",
        colors: [
            Rgb::new(0, 0, 139),
            Rgb::new(0, 100, 200),
            Rgb::new(0, 150, 255),
            Rgb::new(0, 200, 255),
            Rgb::new(0, 255, 200),
            Rgb::new(0, 255, 150),
            Rgb::new(100, 255, 200),
            Rgb::new(200, 255, 255),
        ],
    },
];

/// Palette at `index`, wrapping around.
pub fn palette(index: usize) -> &'static Palette {
    &PALETTES[index % PALETTES.len()]
}
