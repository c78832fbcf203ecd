//! Camera device selection and GStreamer launch strings.

use std::path::Path;

use motiongrid_common::config::CaptureConfig;
use motiongrid_common::error::{MotionGridError, MotionGridResult};

/// Name of the appsink element frames are pulled from.
pub const APPSINK_NAME: &str = "motiongrid-sink";

/// Which native camera element to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPlatform {
    /// `v4l2src`, device node path.
    Linux,
    /// `ksvideosrc`, device index.
    Windows,
    /// `avfvideosrc`, device index.
    MacOS,
    /// `autovideosrc`, no device selection.
    Other,
}

impl CameraPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else {
            Self::Other
        }
    }
}

/// Build the full capture pipeline description for `config`.
///
/// Frames leave the pipeline as RGBA at the configured size and rate. The
/// appsink keeps only the newest buffer so a slow UI never sees stale frames.
pub fn camera_launch(
    platform: CameraPlatform,
    config: &CaptureConfig,
) -> MotionGridResult<String> {
    if config.width == 0 || config.height == 0 || config.fps == 0 {
        return Err(MotionGridError::capture(format!(
            "Invalid capture format {}x{}@{}",
            config.width, config.height, config.fps
        )));
    }

    let source = source_fragment(platform, config.device.as_deref())?;
    Ok(format!(
        "{source} ! videoconvert ! videoscale ! videorate ! video/x-raw,format=RGBA,width={w},height={h},framerate={fps}/1 ! appsink name={APPSINK_NAME} max-buffers=1 drop=true sync=false",
        w = config.width,
        h = config.height,
        fps = config.fps,
    ))
}

fn source_fragment(platform: CameraPlatform, device: Option<&str>) -> MotionGridResult<String> {
    match platform {
        CameraPlatform::Linux => {
            let device = match device {
                Some(device) => device.to_string(),
                None => detect_default_webcam_device().ok_or_else(|| {
                    MotionGridError::capture(
                        "No webcam device found (expected /dev/video0 or another /dev/video* node)",
                    )
                })?,
            };
            Ok(format!(
                "v4l2src device=\"{}\" do-timestamp=true",
                device.replace('"', "\\\"")
            ))
        }
        CameraPlatform::Windows => Ok(format!(
            "ksvideosrc device-index={} do-stats=true",
            device_index(device)?
        )),
        CameraPlatform::MacOS => Ok(format!("avfvideosrc device-index={}", device_index(device)?)),
        CameraPlatform::Other => Ok("autovideosrc".to_string()),
    }
}

fn device_index(device: Option<&str>) -> MotionGridResult<u32> {
    match device {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| {
            MotionGridError::capture(format!(
                "Camera device must be a numeric index on this platform, got {raw:?}"
            ))
        }),
    }
}

/// Pick the most webcam-like V4L2 capture node.
///
/// UVC cameras register a capture node (sysfs `index` 0) and a metadata node
/// (`index` 1) under the same name; only the former delivers video.
fn detect_default_webcam_device() -> Option<String> {
    let best = (0..16u32)
        .filter_map(|idx| {
            let dev_path = format!("/dev/video{idx}");
            if !Path::new(&dev_path).exists() {
                return None;
            }
            let sysfs = format!("/sys/class/video4linux/video{idx}");
            let name = std::fs::read_to_string(format!("{sysfs}/name")).unwrap_or_default();
            let node_index = std::fs::read_to_string(format!("{sysfs}/index"))
                .ok()
                .and_then(|s| s.trim().parse().ok());
            let score = score_v4l2_node(&name, node_index);
            tracing::debug!(device = %dev_path, name = %name.trim(), score, "Probed V4L2 node");
            Some((dev_path, score))
        })
        .filter(|(_, score)| *score > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))?;

    tracing::info!(device = %best.0, score = best.1, "Selected webcam device");
    Some(best.0)
}

/// Score a V4L2 node as a webcam candidate. Zero means "never use".
fn score_v4l2_node(name: &str, node_index: Option<u32>) -> u32 {
    const WEBCAM_HINTS: [&str; 6] = ["webcam", "camera", "cam", "facetime", "uvc", "v4l2loopback"];
    const NON_WEBCAM_HINTS: [&str; 6] = ["tuner", "dvb", "hdmi", "encoder", "decoder", "codec"];

    let name = name.to_lowercase();
    if NON_WEBCAM_HINTS.iter().any(|kw| name.contains(kw)) {
        return 0;
    }

    let base = match node_index {
        Some(0) => 50,
        Some(_) => return 0,
        None => 10,
    };

    if WEBCAM_HINTS.iter().any(|kw| name.contains(kw)) {
        base + 50
    } else {
        base
    }
}
