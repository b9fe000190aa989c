//! Desktop host: a window standing in for the watch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bon::Builder;
use chrono::{FixedOffset, Local, Utc};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowBuilder};

use crate::config::FaceConfig;
use crate::face::{FaceRenderer, TapType};
use crate::render::Canvas;
use crate::timer::{delay_until_next_tick, Host, UpdateMessage, TIME_TICK_RATE_MS};
use crate::Error;

#[derive(Debug, Clone, Builder)]
pub struct WindowOptions {
    #[builder(default = "Watch face".to_string())]
    pub title: String,
    #[builder(default = 400)]
    pub size: u32,
    #[builder(default = false)]
    pub ambient: bool,
    #[builder(default = false)]
    pub low_bit_ambient: bool,
    #[builder(default = 0)]
    pub notifications: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Host services backed by the system clock and the window.
struct DesktopHost {
    window: Arc<Window>,
    pending: Option<(Instant, UpdateMessage)>,
    notifications: u32,
    zone_listener: bool,
}

impl Host for DesktopHost {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn time_zone(&self) -> FixedOffset {
        *Local::now().offset()
    }

    fn notification_count(&self) -> u32 {
        self.notifications
    }

    fn invalidate(&mut self) {
        self.window.request_redraw();
    }

    fn send_update_delayed(&mut self, delay: Duration, message: UpdateMessage) {
        self.pending = Some((Instant::now() + delay, message));
    }

    fn remove_pending_updates(&mut self) {
        self.pending = None;
    }

    fn set_time_zone_listener(&mut self, enabled: bool) {
        self.zone_listener = enabled;
    }
}

impl DesktopHost {
    fn next_time_tick(&self) -> Instant {
        Instant::now() + delay_until_next_tick(self.now_millis(), TIME_TICK_RATE_MS)
    }
}

/// Earliest of the pending update and, while ambient, the next time tick.
fn next_wake(pending: Option<Instant>, time_tick: Option<Instant>) -> Option<Instant> {
    match (pending, time_tick) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Turns left-button presses into tap gestures. Leaving the window mid-press
/// cancels the gesture.
#[derive(Debug, Default)]
struct TapTracker {
    pressed: bool,
}

impl TapTracker {
    fn press(&mut self) -> TapType {
        self.pressed = true;
        TapType::Touch
    }

    fn release(&mut self) -> Option<TapType> {
        std::mem::take(&mut self.pressed).then_some(TapType::Tap)
    }

    fn leave(&mut self) -> Option<TapType> {
        std::mem::take(&mut self.pressed).then_some(TapType::TouchCancel)
    }
}

pub fn run(config: FaceConfig, options: WindowOptions) -> Result<(), Error> {
    let mut face = FaceRenderer::new(config)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&options.title)
        .with_inner_size(LogicalSize::new(options.size as f64, options.size as f64))
        .build(&event_loop)?;
    let window = Arc::new(window);

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let mut host = DesktopHost {
        window: window.clone(),
        pending: None,
        notifications: options.notifications,
        zone_listener: false,
    };

    let mut low_bit_ambient = options.low_bit_ambient;
    let mut burn_in_protection = false;
    face.on_properties_changed(low_bit_ambient, burn_in_protection);
    face.on_size_changed(size.width, size.height);
    face.on_ambient_mode_changed(options.ambient, &mut host);
    face.on_visibility_changed(true, &mut host);

    let started = Instant::now();
    let mut cursor = PhysicalPosition::new(0.0, 0.0);
    let mut taps = TapTracker::default();
    let mut next_time_tick = host.next_time_tick();

    event_loop.run(move |event, window_target| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                face.on_destroy(&mut host);
                window_target.exit();
            }
            WindowEvent::Resized(new_size) => {
                if new_size.width == 0 || new_size.height == 0 {
                    return;
                }
                match pixels.resize_buffer(new_size.width, new_size.height) {
                    Ok(()) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                    }
                    Err(err) => log::warn!("failed to resize buffer: {err}"),
                }
                if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                    log::warn!("failed to resize surface: {err}");
                }
                face.on_size_changed(new_size.width, new_size.height);
                host.invalidate();
            }
            WindowEvent::Occluded(occluded) => {
                face.on_visibility_changed(!occluded, &mut host);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Key::Character(key) = &event.logical_key {
                    match key.as_str() {
                        "a" => {
                            let ambient = !face.mode().is_ambient();
                            face.on_ambient_mode_changed(ambient, &mut host);
                            next_time_tick = host.next_time_tick();
                        }
                        "l" => {
                            low_bit_ambient = !low_bit_ambient;
                            face.on_properties_changed(low_bit_ambient, burn_in_protection);
                        }
                        "b" => {
                            burn_in_protection = !burn_in_protection;
                            face.on_properties_changed(low_bit_ambient, burn_in_protection);
                        }
                        "n" => host.notifications = host.notifications.saturating_add(1),
                        "c" => host.notifications = 0,
                        "z" if host.zone_listener => face.on_time_zone_changed(&mut host),
                        _ => return,
                    }
                    host.invalidate();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = position;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let tap_type = match state {
                    ElementState::Pressed => Some(taps.press()),
                    ElementState::Released => taps.release(),
                };
                if let Some(tap_type) = tap_type {
                    let event_time = started.elapsed().as_millis() as u64;
                    face.on_tap_command(tap_type, cursor.x as i32, cursor.y as i32, event_time);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(tap_type) = taps.leave() {
                    let event_time = started.elapsed().as_millis() as u64;
                    face.on_tap_command(tap_type, cursor.x as i32, cursor.y as i32, event_time);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(mut canvas) = Canvas::new(pixels.frame_mut(), fb_width, fb_height) else {
                    log::warn!("frame smaller than {fb_width}x{fb_height}, skipping draw");
                    return;
                };
                face.on_draw(&mut canvas, &host);
                if let Err(err) = pixels.render() {
                    log::error!("render failed: {err}");
                    window_target.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if let Some((deadline, _)) = &host.pending {
                if *deadline <= now {
                    if let Some((_, message)) = host.pending.take() {
                        face.handle_update_time(&message, &mut host);
                    }
                }
            }
            if face.mode().is_ambient() && next_time_tick <= now {
                face.on_time_tick(&mut host);
                next_time_tick = host.next_time_tick();
            }

            let pending = host.pending.as_ref().map(|(deadline, _)| *deadline);
            let time_tick = face.mode().is_ambient().then_some(next_time_tick);
            window_target.set_control_flow(match next_wake(pending, time_tick) {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            });
        }
        _ => {}
    })?;

    Ok(())
}
