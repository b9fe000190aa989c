// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Analog watch face: hour, minute and second hands over a dial of dots and
//! cardinal numerals, with an ambient low-power rendering and a notification
//! badge behind the 6.
//!
//! [`FaceRenderer`] implements the host callback contract. Hosts feed it size,
//! visibility, ambient and time events through [`Host`], and it answers
//! `on_draw` with a [`Scene`] rendered onto a [`Canvas`]. [`window::run`] is a
//! desktop host for trying the face out.

pub mod config;
mod error;
pub mod face;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod style;
pub mod timer;
pub mod window;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use config::{Color, FaceConfig, HandRatios};
pub use error::Error;
pub use face::{FaceRenderer, TapType};
pub use geometry::{tick_offset, HandAngles, RenderState, TimeSample};
pub use render::{Canvas, Typeface};
pub use scene::{DrawCommand, Scene};
pub use style::{style_for, Mode, Paint, StyleTable};
pub use timer::{delay_until_next_tick, Host, UpdateMessage};
pub use window::WindowOptions;
