//! Where finished frames go.

use log::info;

use crate::pixel::PixelBuffer;

/// Receives each finished frame. Presentation (bitmap upload, blitting) lives
/// behind this trait.
pub trait FrameSink {
    fn present(&mut self, frame: PixelBuffer);
}

/// Logs each frame's size and digest, keeping the most recent one.
#[derive(Debug, Default)]
pub struct LogSink {
    frames: usize,
    last: Option<PixelBuffer>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: PixelBuffer) {
        self.frames += 1;
        info!(
            "frame {}: {}x{}, stride {}, digest {:016x}",
            self.frames,
            frame.width(),
            frame.height(),
            frame.stride(),
            frame.digest()
        );
        self.last = Some(frame);
    }
}
