use bon::Builder;

/// Color representation for face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GRAY: Color = Color::new(0x88, 0x88, 0x88);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fractions of half the shorter screen dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandRatios {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
    pub second_stub: f32,
    pub tick_ring: f32,
    pub numeral_ring: f32,
}

impl Default for HandRatios {
    fn default() -> Self {
        Self {
            hour: 0.5,
            minute: 0.7,
            second: 0.8,
            second_stub: 0.18,
            tick_ring: 0.9,
            numeral_ring: 0.85,
        }
    }
}

/// Everything tunable about the face. `FaceConfig::default()` is the stock look.
#[derive(Debug, Clone, Builder)]
pub struct FaceConfig {
    // Palette
    #[builder(default = Color::new(0x21, 0x1e, 0x1d))]
    pub background_color: Color,
    #[builder(default = Color::WHITE)]
    pub hand_color: Color,
    #[builder(default = Color::GRAY)]
    pub hand_highlight_color: Color,

    // Hands
    #[builder(default = HandRatios::default())]
    pub ratios: HandRatios,
    #[builder(default = 10.0)]
    pub hour_stroke_width: f32,
    #[builder(default = 7.0)]
    pub minute_stroke_width: f32,
    #[builder(default = 4.0)]
    pub second_stroke_width: f32,
    #[builder(default = 15.0)]
    pub hand_center_gap_radius: f32,

    // Hub
    #[builder(default = 8.0)]
    pub center_circle_radius: f32,
    #[builder(default = 3.5)]
    pub center_stroke_width: f32,

    // Dial
    #[builder(default = 5.0)]
    pub tick_radius: f32,
    #[builder(default = 36.0)]
    pub numeral_font_size: f32,

    // Notification badge behind the 6
    #[builder(default = 25.0)]
    pub badge_radius: f32,
    #[builder(default = 20.0)]
    pub badge_hole_radius: f32,

    #[builder(default = include_bytes!("DejaVuSans.ttf"))]
    pub font_data: &'static [u8],
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FaceConfig {
    /// Radius of the black hole punched into the hub in ambient mode.
    pub fn center_hole_radius(&self) -> f32 {
        self.center_circle_radius - self.center_stroke_width
    }
}
