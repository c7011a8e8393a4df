use std::{
    io::Write as _,
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::encode::png::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::math::mul_div255;
use crate::render::backend::FrameRGBA;

/// Settings for an MP4 encode.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Target file.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Reject zero or odd dimensions and a zero frame rate.
    pub fn validate(&self) -> OrreryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrreryError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(OrreryError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p
            return Err(OrreryError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

/// Whether an `ffmpeg` binary can be launched.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

struct Running {
    child: Child,
    stdin: Option<ChildStdin>,
}

/// Pipes frames into a system `ffmpeg` producing an H.264 MP4.
///
/// Frames are composited over `background` before encoding, since the output has no alpha.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    background: Rgba8,
    cfg: Option<EncodeConfig>,
    running: Option<Running>,
    scratch: Vec<u8>,
}

impl std::fmt::Debug for FfmpegSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSink")
            .field("out_path", &self.out_path)
            .field("background", &self.background)
            .field("running", &self.running.is_some())
            .finish()
    }
}

impl FfmpegSink {
    /// Sink that will write `out_path`, replacing it if present.
    pub fn new(out_path: impl Into<PathBuf>, background: Rgba8) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background,
            cfg: None,
            running: None,
            scratch: Vec::new(),
        }
    }

    /// Refuse to replace an existing output file.
    pub fn no_overwrite(mut self) -> Self {
        self.overwrite = false;
        self
    }

    fn spawn(cfg: &EncodeConfig) -> OrreryResult<Running> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            OrreryError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| OrreryError::render("failed to open ffmpeg stdin"))?;
        Ok(Running {
            child,
            stdin: Some(stdin),
        })
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, sink: SinkConfig) -> OrreryResult<()> {
        let cfg = EncodeConfig {
            width: sink.width,
            height: sink.height,
            fps: sink.fps,
            out_path: self.out_path.clone(),
            overwrite: self.overwrite,
        };
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(OrreryError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(OrreryError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        tracing::debug!(width = cfg.width, height = cfg.height, fps = cfg.fps, "starting ffmpeg");
        self.running = Some(Self::spawn(&cfg)?);
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, _idx: u64, frame: &FrameRGBA) -> OrreryResult<()> {
        let Some(cfg) = self.cfg.as_ref() else {
            return Err(OrreryError::validation("ffmpeg sink used before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(OrreryError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.background,
        )?;

        let Some(stdin) = self.running.as_mut().and_then(|r| r.stdin.as_mut()) else {
            return Err(OrreryError::render("ffmpeg encoder is already finalized"));
        };
        stdin.write_all(&self.scratch).map_err(|e| {
            OrreryError::render(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> OrreryResult<()> {
        let Some(mut running) = self.running.take() else {
            return Ok(());
        };
        drop(running.stdin.take());

        let output = running.child.wait_with_output().map_err(|e| {
            OrreryError::render(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OrreryError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        drop(running.stdin.take());
        let _ = running.child.kill();
        let _ = running.child.wait();
        tracing::warn!(path = %self.out_path.display(), "ffmpeg encode abandoned before end");
    }
}

/// Composite `src` over an opaque `bg` into `dst`.
pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: Rgba8,
) -> OrreryResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(OrreryError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                u16::from(mul_div255(u16::from(s[c]), a))
            };
            d[c] = (fg + u16::from(mul_div255(bg[c], inv))).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
