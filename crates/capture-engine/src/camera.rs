//! GStreamer-backed live camera.

use std::sync::OnceLock;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use motiongrid_common::config::CaptureConfig;
use motiongrid_common::error::{MotionGridError, MotionGridResult};

use crate::device::{camera_launch, CameraPlatform, APPSINK_NAME};
use crate::source::{CameraFrame, CaptureSource, CaptureStats};

/// A camera pipeline ending in an appsink that is polled without blocking.
pub struct GstCameraSource {
    name: String,
    pipeline: gst::Pipeline,
    sink: gst_app::AppSink,
    running: bool,
    latest: Option<CameraFrame>,
    stats: CaptureStats,
}

impl GstCameraSource {
    /// Open the platform's default (or configured) camera.
    pub fn open(config: &CaptureConfig) -> MotionGridResult<Self> {
        let launch = camera_launch(CameraPlatform::current(), config)?;
        tracing::debug!(%launch, "Building camera pipeline");
        Self::from_launch("camera", &launch)
    }

    /// Build from a launch description that contains an appsink named
    /// [`APPSINK_NAME`] producing RGBA buffers.
    pub fn from_launch(name: impl Into<String>, launch: &str) -> MotionGridResult<Self> {
        init_gstreamer()?;
        let name = name.into();

        let element = gst::parse::launch(launch)
            .map_err(|e| MotionGridError::capture(format!("Failed to build pipeline: {e}")))?;

        let pipeline = element.dynamic_cast::<gst::Pipeline>().map_err(|_| {
            MotionGridError::capture("Launch string did not produce a pipeline")
        })?;

        let sink = pipeline
            .by_name(APPSINK_NAME)
            .ok_or_else(|| {
                MotionGridError::capture(format!("Pipeline has no element named {APPSINK_NAME}"))
            })?
            .dynamic_cast::<gst_app::AppSink>()
            .map_err(|_| MotionGridError::capture(format!("{APPSINK_NAME} is not an appsink")))?;

        Ok(Self {
            name,
            pipeline,
            sink,
            running: false,
            latest: None,
            stats: CaptureStats::default(),
        })
    }

    /// Drain bus messages; an error or end-of-stream stops the source.
    fn poll_bus(&mut self) {
        let Some(bus) = self.pipeline.bus() else {
            return;
        };

        while let Some(msg) = bus.pop() {
            match msg.view() {
                gst::MessageView::Error(e) => {
                    tracing::error!(
                        pipeline = %self.name,
                        error = %e.error(),
                        debug = ?e.debug(),
                        "Camera pipeline error"
                    );
                    self.running = false;
                }
                gst::MessageView::Eos(_) => {
                    tracing::warn!(pipeline = %self.name, "Camera stream ended");
                    self.running = false;
                }
                _ => {}
            }
        }
    }
}

impl CaptureSource for GstCameraSource {
    fn start(&mut self) -> MotionGridResult<()> {
        self.pipeline.set_state(gst::State::Playing).map_err(|e| {
            MotionGridError::capture(format!("Failed to start {} pipeline: {e:?}", self.name))
        })?;

        // Live sources report NoPreroll; a hard failure (no device, busy
        // device) only surfaces once the state change settles.
        match self.pipeline.state(gst::ClockTime::from_seconds(5)) {
            (Ok(_), gst::State::Playing, _) => {}
            (Ok(_), state, _) => {
                tracing::warn!(
                    pipeline = %self.name,
                    ?state,
                    "Pipeline did not reach Playing state within timeout"
                );
            }
            (Err(e), _, _) => {
                let _ = self.pipeline.set_state(gst::State::Null);
                self.poll_bus();
                return Err(MotionGridError::capture(format!(
                    "{} pipeline failed to reach Playing state: {e:?}",
                    self.name
                )));
            }
        }

        self.running = true;
        tracing::info!(pipeline = %self.name, "Camera started");
        Ok(())
    }

    fn stop(&mut self) -> MotionGridResult<()> {
        self.pipeline.set_state(gst::State::Null).map_err(|e| {
            MotionGridError::capture(format!("Failed to stop {} pipeline: {e:?}", self.name))
        })?;
        self.running = false;
        tracing::info!(
            pipeline = %self.name,
            frames = self.stats.frames_captured,
            dropped = self.stats.frames_dropped,
            "Camera stopped"
        );
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn check_new_frame(&mut self) -> bool {
        self.poll_bus();
        if !self.running {
            return false;
        }

        let mut fresh = false;
        while let Some(sample) = self.sink.try_pull_sample(gst::ClockTime::ZERO) {
            match frame_from_sample(&sample, self.stats.frames_captured + 1) {
                Ok(frame) => {
                    self.stats.frames_captured += 1;
                    self.latest = Some(frame);
                    fresh = true;
                }
                Err(e) => {
                    self.stats.frames_dropped += 1;
                    tracing::warn!(pipeline = %self.name, error = %e, "Dropping camera sample");
                }
            }
        }
        fresh
    }

    fn frame(&self) -> Option<&CameraFrame> {
        self.latest.as_ref()
    }

    fn stats(&self) -> CaptureStats {
        self.stats
    }
}

impl Drop for GstCameraSource {
    fn drop(&mut self) {
        if self.running {
            let _ = self.stop();
        }
    }
}

fn frame_from_sample(sample: &gst::Sample, sequence: u64) -> MotionGridResult<CameraFrame> {
    let caps = sample
        .caps()
        .ok_or_else(|| MotionGridError::capture("Sample has no caps"))?;
    let info = gst_video::VideoInfo::from_caps(caps)
        .map_err(|e| MotionGridError::capture(format!("Unreadable video caps: {e}")))?;
    if info.format() != gst_video::VideoFormat::Rgba {
        return Err(MotionGridError::capture(format!(
            "Expected RGBA samples, got {:?}",
            info.format()
        )));
    }

    let buffer = sample
        .buffer()
        .ok_or_else(|| MotionGridError::capture("Sample has no buffer"))?;
    let map = buffer
        .map_readable()
        .map_err(|e| MotionGridError::capture(format!("Failed to map buffer: {e}")))?;

    let stride = usize::try_from(info.stride()[0])
        .map_err(|_| MotionGridError::capture("Negative row stride"))?;
    let rgba = pack_rows(map.as_slice(), info.width(), info.height(), stride)?;

    Ok(CameraFrame {
        width: info.width(),
        height: info.height(),
        rgba,
        sequence,
    })
}

/// Copy `height` rows of `width` RGBA pixels out of a padded buffer.
fn pack_rows(data: &[u8], width: u32, height: u32, stride: usize) -> MotionGridResult<Vec<u8>> {
    let row_bytes = width as usize * 4;
    if stride < row_bytes {
        return Err(MotionGridError::capture(format!(
            "Row stride {stride} is shorter than {row_bytes} bytes of pixels"
        )));
    }
    let needed = match height as usize {
        0 => 0,
        h => (h - 1) * stride + row_bytes,
    };
    if data.len() < needed {
        return Err(MotionGridError::capture(format!(
            "Buffer holds {} bytes, {width}x{height} with stride {stride} needs {needed}",
            data.len()
        )));
    }

    if stride == row_bytes {
        return Ok(data[..needed].to_vec());
    }

    let mut packed = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(stride).take(height as usize) {
        packed.extend_from_slice(&row[..row_bytes]);
    }
    Ok(packed)
}

fn init_gstreamer() -> MotionGridResult<()> {
    static GST_INIT: OnceLock<Result<(), String>> = OnceLock::new();
    let init_res = GST_INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()));
    match init_res {
        Ok(()) => Ok(()),
        Err(e) => Err(MotionGridError::capture(format!(
            "Failed to initialize GStreamer: {e}"
        ))),
    }
}
