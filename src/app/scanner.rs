// SPDX-License-Identifier: GPL-3.0-only

//! The scan loop
//!
//! One pass reads a frame from every open camera in order and runs
//! decode → debounce/log → render → display on it. After each full pass the
//! sink is polled for the quit key.
//!
//! Console lines are held back while the sink draws over the console (the
//! terminal preview) and written after it has been closed.

use super::camera_ops;
use super::frame_processor::CodeDecoder;
use super::overlay::Overlay;
use super::session::{CameraSession, CameraSummary};
use crate::display::{FrameSink, LoopAction};
use crate::errors::AppResult;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives every open camera through the per-frame pipeline
///
/// Console report lines go to `report`; diagnostics go through `tracing`.
pub struct Scanner<W: Write> {
    sessions: Vec<CameraSession>,
    decoder: Box<dyn CodeDecoder>,
    overlay: Overlay,
    report: W,
    held: Vec<String>,
    passes: u64,
}

impl<W: Write> Scanner<W> {
    pub fn new(
        sessions: Vec<CameraSession>,
        decoder: Box<dyn CodeDecoder>,
        overlay: Overlay,
        report: W,
    ) -> Self {
        Self {
            sessions,
            decoder,
            overlay,
            report,
            held: Vec::new(),
            passes: 0,
        }
    }

    pub fn sessions(&self) -> &[CameraSession] {
        &self.sessions
    }

    /// Completed passes so far
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run until the sink asks to stop
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> AppResult<()> {
        info!(cameras = self.sessions.len(), "Scan loop started");
        loop {
            self.run_pass_at(sink, Instant::now())?;
            if sink.end_pass()? == LoopAction::Stop {
                info!(passes = self.passes, "Scan loop stopped");
                return Ok(());
            }
        }
    }

    /// Process one frame from every camera, stamping detections with `now`
    pub fn run_pass_at(&mut self, sink: &mut dyn FrameSink, now: Instant) -> AppResult<()> {
        for slot in 0..self.sessions.len() {
            self.process_camera(slot, sink, now)?;
        }
        self.passes += 1;
        Ok(())
    }

    /// Write a console line, or hold it back while the sink owns the console
    pub fn report_line(&mut self, sink: &mut dyn FrameSink, line: String) -> AppResult<()> {
        if sink.owns_console() {
            sink.notice(&line);
            self.held.push(line);
            return Ok(());
        }
        writeln!(self.report, "{}", line)?;
        Ok(())
    }

    fn process_camera(
        &mut self,
        slot: usize,
        sink: &mut dyn FrameSink,
        now: Instant,
    ) -> AppResult<()> {
        let session = &mut self.sessions[slot];
        let camera = session.index();

        let frame = match session.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(camera, error = %e, "Frame read failed, skipping camera this pass");
                let line = format!("Cannot read a frame from camera {}.", camera);
                return self.report_line(sink, line);
            }
        };

        let detections = self.decoder.decode(&frame);
        if !detections.is_empty() {
            debug!(camera, count = detections.len(), sequence = frame.sequence, "Decoded codes");
        }

        let mut lines = Vec::new();
        for detection in &detections {
            if let Some(number) = session.tracker_mut().observe(&detection.payload, now) {
                info!(camera, number, payload = %detection.payload, "New detection");
                lines.push(format!(
                    "[Camera {}] detection #{}: {}",
                    camera, number, detection.payload
                ));
            }
        }
        for line in lines {
            self.report_line(sink, line)?;
        }

        let mut image = frame.image;
        self.overlay.render(&mut image, &detections);
        sink.show(camera, &image)
    }

    /// Release every camera, close the display and print totals
    ///
    /// Consumes the scanner, so each camera handle is released exactly once.
    /// The display is closed first so held-back lines and totals land on the
    /// restored console.
    pub fn shutdown(mut self, sink: &mut dyn FrameSink) -> AppResult<Vec<CameraSummary>> {
        let summaries = camera_ops::release_all(std::mem::take(&mut self.sessions));
        let closed = sink.close();

        let written = self
            .held
            .iter()
            .try_for_each(|line| writeln!(self.report, "{}", line))
            .and_then(|_| {
                summaries.iter().try_for_each(|summary| {
                    writeln!(
                        self.report,
                        "{}: total {} detections",
                        summary.camera, summary.detections
                    )
                })
            })
            .and_then(|_| self.report.flush());

        closed?;
        written?;
        info!(cameras = summaries.len(), "Shutdown complete");
        Ok(summaries)
    }
}
