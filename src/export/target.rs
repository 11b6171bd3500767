//! Export size configuration with aspect-ratio locking.

use super::preset::SizePreset;
use crate::svg::{ResolvedDimensions, StylePolicy};

/// User-controlled export size and style settings.
///
/// With the aspect lock on, setting one side recomputes the other from
/// the most recently captured aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportTarget {
    width: u32,
    height: u32,
    lock_aspect_ratio: bool,
    preserve_style: bool,
    aspect_ratio: f64,
}

impl Default for ExportTarget {
    fn default() -> Self {
        Self::from_dimensions(&ResolvedDimensions::DEFAULT)
    }
}

impl ExportTarget {
    /// Seed a target from a document's intrinsic size (lock and style on).
    pub fn from_dimensions(dims: &ResolvedDimensions) -> Self {
        let mut target = Self {
            width: 1,
            height: 1,
            lock_aspect_ratio: true,
            preserve_style: true,
            aspect_ratio: 1.0,
        };
        target.capture(dims);
        target
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub const fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub const fn lock_aspect_ratio(&self) -> bool {
        self.lock_aspect_ratio
    }

    pub const fn preserve_style(&self) -> bool {
        self.preserve_style
    }

    pub const fn style_policy(&self) -> StylePolicy {
        StylePolicy::from_preserve(self.preserve_style)
    }

    /// Adopt a document's intrinsic size and aspect ratio.
    pub fn capture(&mut self, dims: &ResolvedDimensions) {
        self.width = to_side(dims.width);
        self.height = to_side(dims.height);
        self.aspect_ratio = dims.aspect_ratio;
    }

    /// Set the width; with the lock on, `height = round(width / ratio)`.
    pub fn set_width(&mut self, width: u32) {
        self.width = width.max(1);
        if self.lock_aspect_ratio {
            self.height = to_side(f64::from(self.width) / self.aspect_ratio);
        }
    }

    /// Set the height; with the lock on, `width = round(height * ratio)`.
    pub fn set_height(&mut self, height: u32) {
        self.height = height.max(1);
        if self.lock_aspect_ratio {
            self.width = to_side(f64::from(self.height) * self.aspect_ratio);
        }
    }

    /// Set both sides as given.
    ///
    /// With the lock on, the new size becomes the locked aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        if self.lock_aspect_ratio {
            self.aspect_ratio = f64::from(self.width) / f64::from(self.height);
        }
    }

    pub fn apply_preset(&mut self, preset: &SizePreset) {
        self.resize(preset.width, preset.height);
    }

    /// Toggle the aspect lock. Turning it on recomputes the height.
    pub fn set_lock_aspect_ratio(&mut self, lock: bool) {
        self.lock_aspect_ratio = lock;
        if lock {
            self.height = to_side(f64::from(self.width) / self.aspect_ratio);
        }
    }

    pub fn set_preserve_style(&mut self, preserve: bool) {
        self.preserve_style = preserve;
    }
}

/// Round a derived side to whole pixels, at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_side(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}
