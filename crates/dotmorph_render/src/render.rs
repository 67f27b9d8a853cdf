//! Frame recording.
//!
//! [`FrameRecorder`] wraps any [`RenderSurface`] and keeps the fill commands
//! of the current frame, which hosts can replay or inspect.

use serde::{Deserialize, Serialize};

use crate::layout::Rect;
use crate::style::Color;
use crate::surface::{AlphaGrid, FontSpec, RenderSurface};

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
}

/// Surface adapter that records every fill between clears.
#[derive(Debug, Default)]
pub struct FrameRecorder<S> {
    inner: S,
    /// All commands since the last clear.
    commands: Vec<RenderCommand>,
    /// Number of completed frames (clears).
    frames: u64,
}

impl<S: RenderSurface> FrameRecorder<S> {
    /// Wraps a surface.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            commands: Vec::with_capacity(4096),
            frames: 0,
        }
    }

    /// Commands of the current frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Number of clears seen so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The wrapped surface.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The wrapped surface, mutably.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwraps the recorder.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RenderSurface> RenderSurface for FrameRecorder<S> {
    fn measure_text_width(&mut self, text: &str, font: &FontSpec) -> f32 {
        self.inner.measure_text_width(text, font)
    }

    fn rasterize_text(&mut self, text: &str, font: &FontSpec, width: u32, height: u32) -> AlphaGrid {
        self.inner.rasterize_text(text, font, width, height)
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(RenderCommand::FillRect {
            bounds: Rect::new(x, y, width, height),
            color,
        });
        self.inner.fill_rect(x, y, width, height, color);
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
        self.inner.clear();
    }
}
