//! Per-mode paint table.

use crate::config::{Color, FaceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Interactive,
    Ambient,
}

impl Mode {
    pub fn from_ambient(in_ambient: bool) -> Self {
        if in_ambient {
            Mode::Ambient
        } else {
            Mode::Interactive
        }
    }

    pub fn is_ambient(self) -> bool {
        self == Mode::Ambient
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Color,
    pub anti_alias: bool,
}

impl Paint {
    pub const fn new(color: Color, anti_alias: bool) -> Self {
        Self { color, anti_alias }
    }
}

/// Colours and anti-aliasing for every instrument the face draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTable {
    pub background: Color,
    pub hour: Paint,
    pub minute: Paint,
    pub second: Paint,
    pub hub: Paint,
    pub hub_hole: Paint,
    pub tick: Paint,
    pub numeral: Paint,
    pub badge: Paint,
    pub badge_hole: Paint,
}

pub fn style_for(mode: Mode, low_bit_ambient: bool, config: &FaceConfig) -> StyleTable {
    match mode {
        Mode::Ambient => {
            let anti_alias = !low_bit_ambient;
            let white = Paint::new(Color::WHITE, anti_alias);
            let black = Paint::new(Color::BLACK, anti_alias);
            StyleTable {
                background: Color::BLACK,
                hour: white,
                minute: white,
                second: white,
                hub: white,
                hub_hole: black,
                tick: white,
                numeral: white,
                badge: Paint::new(config.hand_color, anti_alias),
                badge_hole: black,
            }
        }
        Mode::Interactive => {
            let hand = Paint::new(config.hand_color, true);
            let background = Paint::new(config.background_color, true);
            StyleTable {
                background: config.background_color,
                hour: hand,
                minute: hand,
                second: Paint::new(config.hand_highlight_color, true),
                hub: hand,
                hub_hole: background,
                tick: hand,
                numeral: hand,
                badge: hand,
                badge_hole: background,
            }
        }
    }
}
