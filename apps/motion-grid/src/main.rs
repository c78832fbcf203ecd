mod input;
mod painter;
mod shell;

use std::time::Duration;

use eframe::egui::{self, Color32};
use motiongrid_capture_engine::start_camera;
use motiongrid_common::config::{AppConfig, LoggingConfig};
use motiongrid_common::logging::init_logging;

use crate::painter::EguiRenderer;
use crate::shell::MotionShell;

fn main() -> anyhow::Result<()> {
    // An invalid config is still reported, through default logging settings.
    let config = match AppConfig::load() {
        Ok(config) => {
            init_logging(&config.logging);
            config
        }
        Err(e) => {
            init_logging(&LoggingConfig::default());
            tracing::error!(error = %e, "Refusing to start with an invalid config");
            return Err(e.into());
        }
    };

    let capture = match start_camera(&config.capture) {
        Ok(capture) => Some(capture),
        Err(e) => {
            tracing::error!(error = %e, "Camera unavailable; running without capture");
            None
        }
    };
    let shell = MotionShell::new(&config, capture)?;
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.capture.fps.max(1)));

    tracing::info!(
        width = config.capture.width,
        height = config.capture.height,
        fps = config.capture.fps,
        grid = %shell.grid_size(),
        camera = shell.has_capture(),
        "Starting motion grid"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Motion Grid")
            .with_inner_size([config.capture.width as f32, config.capture.height as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "Motion Grid",
        options,
        Box::new(move |_cc| Box::new(MotionGridApp::new(shell, frame_interval))),
    )
    .map_err(|e| anyhow::anyhow!("window launch failed: {e}"))
}

struct MotionGridApp {
    shell: MotionShell,
    mask_texture: Option<egui::TextureHandle>,
    frame_interval: Duration,
}

impl MotionGridApp {
    fn new(shell: MotionShell, frame_interval: Duration) -> Self {
        Self {
            shell,
            mask_texture: None,
            frame_interval,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::Text(text) => {
                    for ch in text.chars() {
                        self.shell.handle_key(ch);
                    }
                }
                egui::Event::Key {
                    key: egui::Key::Escape,
                    pressed: true,
                    ..
                } => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                _ => {}
            }
        }
    }
}

impl eframe::App for MotionGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.shell.update();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let Some(content) = self.shell.mask().map(|m| m.dimensions()) else {
                    return;
                };
                let area = ui.max_rect();
                let mut renderer =
                    EguiRenderer::fit(ctx, ui.painter(), &mut self.mask_texture, area, content);
                self.shell.draw(&mut renderer);
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

impl Drop for MotionGridApp {
    fn drop(&mut self) {
        if let Some(stats) = self.shell.capture_stats() {
            tracing::info!(
                frames_captured = stats.frames_captured,
                frames_dropped = stats.frames_dropped,
                drop_rate = stats.drop_rate(),
                frames_differenced = self.shell.frames_processed(),
                "Motion grid closed"
            );
        }
    }
}
