// SPDX-License-Identifier: GPL-3.0-only

//! Native preview windows (minifb), one per camera

use super::{FrameSink, LoopAction};
use crate::constants::window_title;
use crate::errors::{AppError, AppResult};
use image::RgbImage;
use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};
use std::collections::BTreeMap;
use tracing::{debug, info};

struct CameraWindow {
    window: Window,
    /// Reused 0RGB pixel buffer
    buffer: Vec<u32>,
    /// Whether `show` updated the window during the current pass
    presented: bool,
}

pub struct WindowSink {
    windows: BTreeMap<u32, CameraWindow>,
}

impl WindowSink {
    /// Open a resizable window for every camera
    pub fn new(cameras: &[u32], width: u32, height: u32) -> AppResult<Self> {
        let mut windows = BTreeMap::new();
        for &camera in cameras {
            let window = Window::new(
                &window_title(camera),
                width as usize,
                height as usize,
                WindowOptions {
                    resize: true,
                    scale_mode: ScaleMode::AspectRatioStretch,
                    ..WindowOptions::default()
                },
            )?;
            info!(camera, "Opened preview window");
            windows.insert(
                camera,
                CameraWindow {
                    window,
                    buffer: Vec::new(),
                    presented: false,
                },
            );
        }
        Ok(Self { windows })
    }
}

/// Pack an RGB image into minifb's 0RGB u32 layout
pub fn rgb_to_0rgb(image: &RgbImage, out: &mut Vec<u32>) {
    out.clear();
    out.reserve(image.width() as usize * image.height() as usize);
    for px in image.pixels() {
        let [r, g, b] = px.0;
        out.push(((r as u32) << 16) | ((g as u32) << 8) | b as u32);
    }
}

impl FrameSink for WindowSink {
    fn show(&mut self, camera: u32, frame: &RgbImage) -> AppResult<()> {
        let Some(target) = self.windows.get_mut(&camera) else {
            return Err(AppError::Display(format!("no window for camera {}", camera)));
        };
        if !target.window.is_open() {
            return Ok(());
        }

        rgb_to_0rgb(frame, &mut target.buffer);
        target.window.update_with_buffer(
            &target.buffer,
            frame.width() as usize,
            frame.height() as usize,
        )?;
        target.presented = true;
        Ok(())
    }

    fn end_pass(&mut self) -> AppResult<LoopAction> {
        let mut any_open = false;
        for (camera, target) in self.windows.iter_mut() {
            // minifb only handles input inside update calls
            if !std::mem::take(&mut target.presented) && target.window.is_open() {
                target.window.update();
            }
            if !target.window.is_open() {
                continue;
            }
            any_open = true;
            if target.window.is_key_pressed(Key::Q, KeyRepeat::No)
                || target.window.is_key_down(Key::Q)
            {
                debug!(camera, "Quit key pressed");
                return Ok(LoopAction::Stop);
            }
        }

        if !any_open {
            info!("All preview windows closed");
            return Ok(LoopAction::Stop);
        }
        Ok(LoopAction::Continue)
    }

    fn close(&mut self) -> AppResult<()> {
        // minifb destroys the native window on drop
        let count = self.windows.len();
        self.windows.clear();
        info!(count, "Closed preview windows");
        Ok(())
    }
}
