use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse numeral font")]
    Font,
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
}
