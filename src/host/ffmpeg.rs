use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::FRAME_TIME;
use crate::engine::Presenter;
use crate::error::BannerError;
use crate::pixel_buffer::PixelBuffer;

/// Pipes raw RGBA frames into an `ffmpeg` process encoding H.264.
///
/// Recording is offline: every frame advances the banner by exactly
/// [`FRAME_TIME`], however long encoding takes.
pub struct FfmpegRecorder {
    process: Child,
    stdin: Option<ChildStdin>,
    frames: u64,
}

impl FfmpegRecorder {
    pub fn spawn(width: u32, height: u32, fps: u32, output: &Path) -> Result<Self, BannerError> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{width}x{height}")])
            .args(["-framerate", &format!("{fps}")])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()
            .map_err(|e| BannerError::Presenter(format!("failed to start ffmpeg: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| BannerError::Presenter("ffmpeg stdin unavailable".to_string()))?;

        info!(?output, width, height, fps, "recording");
        Ok(Self {
            process,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    #[must_use]
    pub fn frames_written(&self) -> u64 {
        self.frames
    }
}

impl Presenter for FfmpegRecorder {
    fn frame_time(&mut self) -> Duration {
        FRAME_TIME
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), BannerError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| BannerError::Presenter("ffmpeg stdin closed".to_string()))?;

        // Rows are already top to bottom, as rawvideo expects.
        stdin
            .write_all(frame.data())
            .map_err(|e| BannerError::Presenter(format!("failed to write to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for FfmpegRecorder {
    fn drop(&mut self) {
        // Close stdin pipe and wait for ffmpeg to finish
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!(frames = self.frames, "recording finished"),
            Ok(status) => warn!(%status, "ffmpeg exited with failure"),
            Err(e) => warn!(error = %e, "failed to wait for ffmpeg"),
        }
    }
}
