//! The watch face engine: host callbacks in, draw commands out.

use chrono::{FixedOffset, Offset, Utc};

use crate::config::FaceConfig;
use crate::geometry::{RenderState, TimeSample};
use crate::render::{Canvas, Typeface};
use crate::scene::{compose, Frame, MeasureText, Scene};
use crate::style::{style_for, Mode, StyleTable};
use crate::timer::{Host, UpdateMessage, UpdateTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapType {
    /// Finger went down.
    Touch,
    /// The gesture turned into something else.
    TouchCancel,
    /// Finger lifted without moving away.
    Tap,
}

pub struct FaceRenderer {
    config: FaceConfig,
    typeface: Typeface,
    state: RenderState,
    mode: Mode,
    style: StyleTable,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    visible: bool,
    listening_for_time_zone: bool,
    zone: FixedOffset,
    timer: UpdateTimer,
}

impl FaceRenderer {
    pub fn new(config: FaceConfig) -> Result<Self, crate::Error> {
        let typeface = Typeface::from_bytes(config.font_data)?;
        let style = style_for(Mode::Interactive, false, &config);
        Ok(Self {
            config,
            typeface,
            state: RenderState::default(),
            mode: Mode::Interactive,
            style,
            low_bit_ambient: false,
            burn_in_protection: false,
            visible: false,
            listening_for_time_zone: false,
            zone: Utc.fix(),
            timer: UpdateTimer::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    pub fn style(&self) -> &StyleTable {
        &self.style
    }

    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        log::debug!("surface changed to {width}x{height}");
        self.state = RenderState::from_size(width, height, &self.config.ratios);
    }

    pub fn on_visibility_changed(&mut self, visible: bool, host: &mut impl Host) {
        log::debug!("visibility changed, visible: {visible}");
        self.visible = visible;
        if visible {
            self.listen_for_time_zone(true, host);
            // the zone may have moved while hidden
            self.zone = host.time_zone();
            host.invalidate();
        } else {
            self.listen_for_time_zone(false, host);
        }
        self.update_timer(host);
    }

    pub fn on_ambient_mode_changed(&mut self, in_ambient: bool, host: &mut impl Host) {
        log::debug!("ambient mode changed, ambient: {in_ambient}");
        self.mode = Mode::from_ambient(in_ambient);
        self.refresh_style();
        self.update_timer(host);
    }

    pub fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        log::debug!("low bit ambient: {low_bit_ambient}, burn-in protection: {burn_in_protection}");
        self.low_bit_ambient = low_bit_ambient;
        self.burn_in_protection = burn_in_protection;
        self.refresh_style();
    }

    pub fn on_time_zone_changed(&mut self, host: &mut impl Host) {
        self.zone = host.time_zone();
        log::debug!("time zone changed to {}", self.zone);
        host.invalidate();
    }

    pub fn on_time_tick(&mut self, host: &mut impl Host) {
        host.invalidate();
    }

    pub fn on_tap_command(&mut self, tap_type: TapType, x: i32, y: i32, event_time: u64) {
        log::debug!("tap {tap_type:?} at ({x}, {y}), t={event_time}");
    }

    /// Periodic update delivered by the host. Stale messages are ignored.
    pub fn handle_update_time(&mut self, message: &UpdateMessage, host: &mut impl Host) {
        if !message.is_live() {
            return;
        }
        host.invalidate();
        if self.should_timer_be_running() {
            self.timer.rearm(host);
        }
    }

    pub fn on_destroy(&mut self, host: &mut impl Host) {
        self.timer.shutdown(host);
        self.listen_for_time_zone(false, host);
    }

    /// Build the scene for the current instant without rasterising it.
    pub fn compose(&self, host: &impl Host) -> Scene {
        self.compose_with(host, &self.typeface)
    }

    pub fn on_draw(&mut self, canvas: &mut Canvas, host: &impl Host) {
        self.compose(host).render(canvas, &self.typeface);
    }

    fn compose_with(&self, host: &impl Host, measure: &impl MeasureText) -> Scene {
        let sample = TimeSample::at(host.now_millis(), &self.zone);
        compose(
            &Frame {
                state: &self.state,
                style: &self.style,
                mode: self.mode,
                sample,
                notification_count: host.notification_count(),
                config: &self.config,
            },
            measure,
        )
    }

    fn refresh_style(&mut self) {
        self.style = style_for(self.mode, self.low_bit_ambient, &self.config);
    }

    fn should_timer_be_running(&self) -> bool {
        self.visible && !self.mode.is_ambient()
    }

    fn update_timer(&mut self, host: &mut impl Host) {
        self.timer.restart(self.should_timer_be_running(), host);
    }

    fn listen_for_time_zone(&mut self, enabled: bool, host: &mut impl Host) {
        if self.listening_for_time_zone == enabled {
            return;
        }
        self.listening_for_time_zone = enabled;
        host.set_time_zone_listener(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::scene::tests::FixedMetrics;
    use crate::scene::{DrawCommand, Hand};
    use crate::timer::tests::RecordingHost;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn face() -> FaceRenderer {
        let mut face = FaceRenderer::new(FaceConfig::default()).unwrap();
        face.on_size_changed(400, 400);
        face
    }

    fn second_hands(scene: &Scene) -> usize {
        scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { hand: Hand::Second, .. }))
            .count()
    }

    #[test]
    fn becoming_visible_starts_the_timer() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_visibility_changed(true, &mut host);
        assert_eq!(host.sent, vec![Duration::ZERO]);
        assert!(host.listening);
        assert_eq!(host.invalidations, 1);
    }

    #[test]
    fn timer_rearms_on_second_boundary() {
        let mut face = face();
        let mut host = RecordingHost {
            now: 42_300,
            ..Default::default()
        };
        face.on_visibility_changed(true, &mut host);
        let message = host.take_pending().unwrap();
        face.handle_update_time(&message, &mut host);
        assert_eq!(host.sent.last(), Some(&Duration::from_millis(700)));
        assert_eq!(host.pending.len(), 1);
        assert_eq!(host.invalidations, 2);
    }

    #[test]
    fn ambient_stops_the_timer() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_visibility_changed(true, &mut host);
        face.on_ambient_mode_changed(true, &mut host);
        assert!(host.pending.is_empty());

        face.on_ambient_mode_changed(false, &mut host);
        assert_eq!(host.pending.len(), 1);
    }

    #[test]
    fn late_message_after_ambient_does_not_rearm() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_visibility_changed(true, &mut host);
        let message = host.take_pending().unwrap();
        face.on_ambient_mode_changed(true, &mut host);
        face.handle_update_time(&message, &mut host);
        assert!(host.pending.is_empty());
    }

    #[test]
    fn hidden_face_stops_timer_and_listener() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_visibility_changed(true, &mut host);
        face.on_visibility_changed(true, &mut host);
        assert_eq!(host.listener_changes, 1);
        face.on_visibility_changed(false, &mut host);
        assert!(host.pending.is_empty());
        assert!(!host.listening);
        assert_eq!(host.listener_changes, 2);
    }

    #[test]
    fn destroyed_face_ignores_stale_message() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_visibility_changed(true, &mut host);
        let message = host.take_pending().unwrap();
        face.on_destroy(&mut host);
        let invalidations = host.invalidations;
        face.handle_update_time(&message, &mut host);
        assert_eq!(host.invalidations, invalidations);
        assert!(host.pending.is_empty());
        assert!(!host.listening);
    }

    #[test]
    fn mode_switch_recomputes_style_not_geometry() {
        let mut face = face();
        let mut host = RecordingHost::default();
        let state = *face.render_state();
        face.on_ambient_mode_changed(true, &mut host);
        assert_eq!(face.mode(), Mode::Ambient);
        assert_eq!(face.style().background, Color::BLACK);
        assert_eq!(*face.render_state(), state);

        face.on_properties_changed(true, true);
        assert!(!face.style().hour.anti_alias);
        assert!(face.burn_in_protection());
        assert_eq!(*face.render_state(), state);
    }

    #[test]
    fn second_hand_follows_mode() {
        let mut face = face();
        let mut host = RecordingHost::default();
        assert_eq!(second_hands(&face.compose_with(&host, &FixedMetrics)), 2);
        face.on_ambient_mode_changed(true, &mut host);
        assert_eq!(second_hands(&face.compose_with(&host, &FixedMetrics)), 0);
    }

    #[test]
    fn draw_reads_time_in_cached_zone() {
        let mut face = face();
        // 1970-01-01T00:00:00Z, host zone +03:00
        let mut host = RecordingHost {
            offset_secs: 3 * 3_600,
            ..Default::default()
        };
        let hour_rotation = |face: &FaceRenderer, host: &RecordingHost| {
            face.compose_with(host, &FixedMetrics)
                .commands()
                .iter()
                .find_map(|c| match c {
                    DrawCommand::Line {
                        hand: Hand::Hour,
                        rotation,
                        ..
                    } => Some(rotation.degrees),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(hour_rotation(&face, &host), 0.0);
        face.on_time_zone_changed(&mut host);
        assert_eq!(hour_rotation(&face, &host), 90.0);
        assert_eq!(host.invalidations, 1);
    }

    #[test]
    fn time_tick_invalidates() {
        let mut face = face();
        let mut host = RecordingHost::default();
        face.on_time_tick(&mut host);
        assert_eq!(host.invalidations, 1);
    }

    #[test]
    fn draw_after_resize_fills_canvas() {
        let mut face = face();
        let host = RecordingHost::default();
        face.on_size_changed(64, 48);
        let mut frame = vec![0; 64 * 48 * 4];
        let mut canvas = Canvas::new(&mut frame, 64, 48).unwrap();
        face.on_draw(&mut canvas, &host);
        assert_eq!(
            canvas.pixel(0, 0),
            Some(FaceConfig::default().background_color)
        );
    }

    #[test]
    fn stale_buffer_after_failed_resize_is_not_drawn() {
        let mut face = face();
        let host = RecordingHost::default();
        // the face was sized to 400x400 but the buffer never grew
        let mut frame = vec![0; 200 * 200 * 4];
        assert!(Canvas::new(&mut frame, 400, 400).is_none());
        let mut canvas = Canvas::new(&mut frame, 200, 200).unwrap();
        face.on_draw(&mut canvas, &host);
        assert_eq!(
            canvas.pixel(0, 0),
            Some(FaceConfig::default().background_color)
        );
    }
}
