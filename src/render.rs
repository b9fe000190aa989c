//! Software rasteriser that replays a `Scene` onto an RGBA frame.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::error::Error;
use crate::scene::{DrawCommand, MeasureText, Scene, TextBounds};

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// RGBA8 frame the face is drawn into. Its size is the drawing bounds.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// `None` when `frame` holds fewer than `width * height` pixels.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Option<Self> {
        let needed = width.checked_mul(height)?.checked_mul(4)?;
        if frame.len() < needed {
            return None;
        }
        Some(Self {
            frame,
            width,
            height,
        })
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        let out = [
            mix(color.r, self.frame[idx]),
            mix(color.g, self.frame[idx + 1]),
            mix(color.b, self.frame[idx + 2]),
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }
}

/// Font used for the numerals.
pub struct Typeface {
    font: Font<'static>,
}

impl Typeface {
    pub fn from_bytes(data: &'static [u8]) -> Result<Self, Error> {
        let font = Font::try_from_bytes(data).ok_or(Error::Font)?;
        Ok(Self { font })
    }
}

impl MeasureText for Typeface {
    fn text_bounds(&self, text: &str, size: f32) -> TextBounds {
        let glyphs: Vec<PositionedGlyph> = self
            .font
            .layout(text, Scale::uniform(size), point(0.0, 0.0))
            .collect();
        let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(min_x, max_x, min_y, max_y), bb| {
                (
                    min_x.min(bb.min.x),
                    max_x.max(bb.max.x),
                    min_y.min(bb.min.y),
                    max_y.max(bb.max.y),
                )
            },
        );
        if min_x > max_x {
            return TextBounds::default();
        }
        TextBounds {
            left: min_x as f32,
            top: min_y as f32,
            right: max_x as f32,
            bottom: max_y as f32,
        }
    }
}

// ============================================================================
// SCENE PLAYBACK
// ============================================================================

impl Scene {
    pub fn render(&self, canvas: &mut Canvas, typeface: &Typeface) {
        for command in self.commands() {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius,
                    paint,
                    ..
                } => draw_circle(canvas, *cx, *cy, *radius, paint.color, paint.anti_alias),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    size,
                    paint,
                } => draw_text(
                    canvas,
                    typeface,
                    *x,
                    *y,
                    text,
                    *size,
                    paint.color,
                    paint.anti_alias,
                ),
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    width,
                    rotation,
                    paint,
                    ..
                } => {
                    let (x0, y0) = rotation.apply(*x0, *y0);
                    let (x1, y1) = rotation.apply(*x1, *y1);
                    draw_thick_line(
                        canvas,
                        x0,
                        y0,
                        x1,
                        y1,
                        *width,
                        paint.color,
                        paint.anti_alias,
                    );
                }
            }
        }
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

/// Without anti-aliasing coverage snaps to fully on or off.
fn coverage(alpha: f32, anti_alias: bool) -> f32 {
    if anti_alias {
        alpha.clamp(0.0, 1.0)
    } else if alpha >= 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Butt-capped line; coordinates are pixel-centre based.
fn draw_thick_line(
    canvas: &mut Canvas,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    color: Color,
    anti_alias: bool,
) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len = (dx * dx + dy * dy).sqrt();
    if len <= f32::EPSILON {
        return;
    }
    let reach = thickness.ceil() + 1.0;
    let min_x = (x0.min(x1) - reach).floor() as i32;
    let max_x = (x0.max(x1) + reach).ceil() as i32;
    let min_y = (y0.min(y1) - reach).floor() as i32;
    let max_y = (y0.max(y1) + reach).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5 - x0;
            let py = y as f32 + 0.5 - y0;
            let along = (px * dx + py * dy) / len;
            let across = (px * dy - py * dx).abs() / len;
            let overshoot = (-along).max(along - len).max(0.0);
            let side = 1.0 - (across - thickness / 2.0 + 0.5).clamp(0.0, 1.0);
            let end = 1.0 - overshoot.clamp(0.0, 1.0);
            let aa = coverage(side * end, anti_alias);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

fn draw_circle(canvas: &mut Canvas, cx: f32, cy: f32, radius: f32, color: Color, anti_alias: bool) {
    let min_x = (cx - radius - 1.0).floor() as i32;
    let max_x = (cx + radius + 1.0).ceil() as i32;
    let min_y = (cy - radius - 1.0).floor() as i32;
    let max_y = (cy + radius + 1.0).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let ddx = x as f32 + 0.5 - cx;
            let ddy = y as f32 + 0.5 - cy;
            let dist = (ddx * ddx + ddy * ddy).sqrt();
            let aa = coverage(radius + 0.5 - dist, anti_alias);
            if aa > 0.0 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

fn draw_text(
    canvas: &mut Canvas,
    typeface: &Typeface,
    x: f32,
    y: f32,
    text: &str,
    size: f32,
    color: Color,
    anti_alias: bool,
) {
    let glyphs: Vec<PositionedGlyph> = typeface
        .font
        .layout(text, Scale::uniform(size), point(x, y))
        .collect();
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let aa = coverage(v, anti_alias);
                if aa > 0.0 {
                    canvas.blend(bb.min.x + gx as i32, bb.min.y + gy as i32, color, aa);
                }
            });
        }
    }
}
