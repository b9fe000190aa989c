//! Retained-mode draw commands and the face's draw sequence.

use crate::config::{Color, FaceConfig};
use crate::geometry::{tick_offset, HandAngles, RenderState, TimeSample};
use crate::style::{Mode, Paint, StyleTable};

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Tick,
    Badge,
    BadgeHole,
    Hub,
    HubHole,
}

/// Clockwise rotation in degrees about a pivot, applied to a single command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot_x: f32,
    pub pivot_y: f32,
}

impl Rotation {
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let (sin, cos) = self.degrees.to_radians().sin_cos();
        let dx = x - self.pivot_x;
        let dy = y - self.pivot_y;
        (
            self.pivot_x + dx * cos - dy * sin,
            self.pivot_y + dx * sin + dy * cos,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        part: Part,
        cx: f32,
        cy: f32,
        radius: f32,
        paint: Paint,
    },
    /// `(x, y)` is the left end of the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        paint: Paint,
    },
    /// Butt-capped segment given in the unrotated frame.
    Line {
        hand: Hand,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        width: f32,
        rotation: Rotation,
        paint: Paint,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

// ============================================================================
// TEXT METRICS
// ============================================================================

/// Ink bounds of a string relative to its baseline origin; `top` is negative
/// above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TextBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

pub trait MeasureText {
    fn text_bounds(&self, text: &str, size: f32) -> TextBounds;
}

// ============================================================================
// DRAW SEQUENCE
// ============================================================================

/// Everything one frame depends on.
pub struct Frame<'a> {
    pub state: &'a RenderState,
    pub style: &'a StyleTable,
    pub mode: Mode,
    pub sample: TimeSample,
    pub notification_count: u32,
    pub config: &'a FaceConfig,
}

pub fn compose(frame: &Frame, measure: &impl MeasureText) -> Scene {
    let mut scene = Scene::default();
    scene.add_command(DrawCommand::Clear(frame.style.background));

    add_ticks_and_numerals(&mut scene, frame, measure);

    let angles = HandAngles::from_sample(&frame.sample);
    log::trace!(
        "hands at {:?} for {:02}:{:02}:{:02}",
        angles,
        frame.sample.hours,
        frame.sample.minutes,
        frame.sample.seconds
    );
    add_hands(&mut scene, frame, &angles);
    add_hub(&mut scene, frame);

    scene
}

fn add_ticks_and_numerals(scene: &mut Scene, frame: &Frame, measure: &impl MeasureText) {
    let state = frame.state;
    let style = frame.style;
    let size = frame.config.numeral_font_size;

    for index in 1..=12 {
        let (num_x, num_y) = tick_offset(index, state.number_radius);
        let (num_x, num_y) = (state.center_x + num_x, state.center_y + num_y);

        let text = index.to_string();
        let bounds = measure.text_bounds(&text, size);
        let (w, h) = (bounds.width(), bounds.height());

        let origin = match index {
            12 => Some((num_x - w / 2.0 - bounds.left, num_y + h - bounds.bottom)),
            3 => Some((num_x - w - bounds.left, num_y + h / 2.0 - bounds.bottom)),
            6 => {
                if frame.notification_count > 0 {
                    let badge_y = num_y - h / 2.0;
                    scene.add_command(DrawCommand::Circle {
                        part: Part::Badge,
                        cx: num_x,
                        cy: badge_y,
                        radius: frame.config.badge_radius,
                        paint: style.badge,
                    });
                    scene.add_command(DrawCommand::Circle {
                        part: Part::BadgeHole,
                        cx: num_x,
                        cy: badge_y,
                        radius: frame.config.badge_hole_radius,
                        paint: style.badge_hole,
                    });
                }
                Some((num_x - w / 2.0 - bounds.left, num_y - bounds.bottom))
            }
            9 => Some((num_x - bounds.left, num_y + h / 2.0 - bounds.bottom)),
            _ => None,
        };

        match origin {
            Some((x, y)) => scene.add_command(DrawCommand::Text {
                x,
                y,
                text,
                size,
                paint: style.numeral,
            }),
            None => {
                let (tick_x, tick_y) = tick_offset(index, state.tick_radius);
                scene.add_command(DrawCommand::Circle {
                    part: Part::Tick,
                    cx: state.center_x + tick_x,
                    cy: state.center_y + tick_y,
                    radius: frame.config.tick_radius,
                    paint: style.tick,
                });
            }
        }
    }
}

fn add_hands(scene: &mut Scene, frame: &Frame, angles: &HandAngles) {
    let state = frame.state;
    let config = frame.config;
    let (cx, cy) = (state.center_x, state.center_y);
    let gap = config.hand_center_gap_radius;
    let rotated = |degrees| Rotation {
        degrees,
        pivot_x: cx,
        pivot_y: cy,
    };

    if !frame.mode.is_ambient() {
        for (y0, y1) in [
            (cy - gap, cy - state.second_hand_length),
            (cy + gap, cy + state.second_hand_stub_length),
        ] {
            scene.add_command(DrawCommand::Line {
                hand: Hand::Second,
                x0: cx,
                y0,
                x1: cx,
                y1,
                width: config.second_stroke_width,
                rotation: rotated(angles.seconds),
                paint: frame.style.second,
            });
        }
    }

    scene.add_command(DrawCommand::Line {
        hand: Hand::Hour,
        x0: cx,
        y0: cy - gap,
        x1: cx,
        y1: cy - state.hour_hand_length,
        width: config.hour_stroke_width,
        rotation: rotated(angles.hours),
        paint: frame.style.hour,
    });
    scene.add_command(DrawCommand::Line {
        hand: Hand::Minute,
        x0: cx,
        y0: cy - gap,
        x1: cx,
        y1: cy - state.minute_hand_length,
        width: config.minute_stroke_width,
        rotation: rotated(angles.minutes),
        paint: frame.style.minute,
    });
}

fn add_hub(scene: &mut Scene, frame: &Frame) {
    let state = frame.state;
    scene.add_command(DrawCommand::Circle {
        part: Part::Hub,
        cx: state.center_x,
        cy: state.center_y,
        radius: frame.config.center_circle_radius,
        paint: frame.style.hub,
    });
    if frame.mode.is_ambient() {
        scene.add_command(DrawCommand::Circle {
            part: Part::HubHole,
            cx: state.center_x,
            cy: state.center_y,
            radius: frame.config.center_hole_radius(),
            paint: frame.style.hub_hole,
        });
    }
}
