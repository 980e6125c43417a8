// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based preview
//!
//! Renders every camera side by side using Unicode half-block characters
//! for improved vertical resolution.

use crate::constants::{KEY_POLL_WAIT, QUIT_KEY};
use crate::display::{FrameSink, LoopAction};
use crate::errors::{AppError, AppResult};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::RgbImage;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Widget,
};
use std::io::{self, stdout};
use tracing::info;

pub struct TerminalSink {
    terminal: Option<Terminal<CrosstermBackend<io::Stdout>>>,
    panes: Vec<FrameWidget>,
    status_message: String,
    last_notice: Option<String>,
}

impl TerminalSink {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn new(cameras: &[u32]) -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        info!(count = cameras.len(), "Terminal preview started");

        Ok(Self {
            terminal: Some(terminal),
            panes: cameras.iter().map(|&camera| FrameWidget::new(camera)).collect(),
            status_message: build_status_message(cameras.len()),
            last_notice: None,
        })
    }

    fn draw(&mut self) -> AppResult<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };
        let panes = &self.panes;
        let status_message = match &self.last_notice {
            Some(notice) => format!("{} | {}", self.status_message, notice),
            None => self.status_message.clone(),
        };

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let camera_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };
            let columns = Layout::horizontal(
                panes
                    .iter()
                    .map(|_| Constraint::Ratio(1, panes.len().max(1) as u32)),
            )
            .split(camera_area);

            for (pane, column) in panes.iter().zip(columns.iter()) {
                f.render_widget(pane, *column);
            }

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            f.render_widget(
                StatusBar {
                    message: &status_message,
                },
                status_area,
            );
        })?;

        Ok(())
    }
}

impl FrameSink for TerminalSink {
    fn show(&mut self, camera: u32, frame: &RgbImage) -> AppResult<()> {
        match self.panes.iter_mut().find(|p| p.camera == camera) {
            Some(pane) => {
                pane.update_frame(frame.clone());
                Ok(())
            }
            None => Err(AppError::Display(format!("no pane for camera {}", camera))),
        }
    }

    fn end_pass(&mut self) -> AppResult<LoopAction> {
        self.draw()?;

        if event::poll(KEY_POLL_WAIT)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Raw mode swallows SIGINT, so Ctrl+C is handled here
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(LoopAction::Stop);
            }
            if key.code == KeyCode::Char(QUIT_KEY) {
                return Ok(LoopAction::Stop);
            }
        }

        Ok(LoopAction::Continue)
    }

    fn close(&mut self) -> AppResult<()> {
        let Some(mut terminal) = self.terminal.take() else {
            return Ok(());
        };
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("Terminal restored");
        Ok(())
    }

    fn owns_console(&self) -> bool {
        self.terminal.is_some()
    }

    fn notice(&mut self, line: &str) {
        self.last_notice = Some(line.to_string());
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        // Leave the user with a usable shell even if close() was skipped
        let _ = self.close();
    }
}

fn build_status_message(camera_count: usize) -> String {
    format!("{} camera(s) | '{}' quit", camera_count, QUIT_KEY)
}

/// Widget that renders a camera frame using half-block characters
struct FrameWidget {
    camera: u32,
    frame: Option<RgbImage>,
}

impl FrameWidget {
    fn new(camera: u32) -> Self {
        Self {
            camera,
            frame: None,
        }
    }

    fn update_frame(&mut self, frame: RgbImage) {
        self.frame = Some(frame);
    }
}

impl Widget for &FrameWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        // Camera label on the first row
        buf.set_string(
            area.x,
            area.y,
            format!("Camera {}", self.camera),
            Style::default().fg(Color::White),
        );
        let area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 1,
        };

        let Some(frame) = &self.frame else {
            let msg = "Waiting for camera...";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, Style::default());
            }
            return;
        };

        // Each terminal cell displays 2 vertical pixels using half-block characters
        let frame_aspect = frame.width() as f64 / frame.height() as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = frame.width() as f64 / display_width as f64;
        let y_scale = frame.height() as f64 / (display_height * 2) as f64;

        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top_color = sample_pixel(frame, src_x, src_y_top);
                let bottom_color = sample_pixel(frame, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }
    }
}

fn sample_pixel(frame: &RgbImage, x: u32, y: u32) -> Color {
    let x = x.min(frame.width() - 1);
    let y = y.min(frame.height() - 1);
    let [r, g, b] = frame.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();

        buf.set_string(
            area.x,
            area.y,
            &text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
