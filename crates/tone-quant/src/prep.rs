//! Optional preparation stages ahead of quantization.
//!
//! Simplicity smoothing and focus blur are both "skip when zero" stages.
//! Instead of a ladder of conditionals, the active stages are planned as an
//! explicit list and folded over the buffer in order, so the plan can be
//! inspected in tests and each stage stays independently testable.

use crate::blur;
use crate::raster::Raster;
use crate::smooth;

/// One planned preparation stage with its strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepStage {
    /// Edge-preserving bilateral smoothing (see [`smooth::bilateral`]).
    Smooth(u32),
    /// Gaussian focus blur (see [`blur::gaussian`]).
    FocusBlur(u32),
}

impl PrepStage {
    /// Run this stage, consuming the input buffer.
    pub fn apply(self, raster: Raster) -> Raster {
        match self {
            PrepStage::Smooth(strength) => smooth::bilateral(raster, strength),
            PrepStage::FocusBlur(radius) => blur::gaussian(raster, radius),
        }
    }
}

/// Preparation parameters for one request.
///
/// Smoothing always runs before focus blur, so the blur cannot soften the
/// edges the bilateral stage just preserved for clustering.
///
/// # Example
///
/// ```
/// use tone_quant::{PrepOptions, PrepStage};
///
/// let plan = PrepOptions::new().simplicity(4).stages();
/// assert_eq!(plan, vec![PrepStage::Smooth(4)]);
///
/// assert!(PrepOptions::new().stages().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepOptions {
    /// Bilateral smoothing strength; 0 disables the stage.
    pub simplicity: u32,

    /// Focus blur radius; 0 disables the stage.
    pub focus_blur: u32,
}

impl PrepOptions {
    /// Create options with both stages disabled.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smoothing strength.
    #[inline]
    pub fn simplicity(mut self, strength: u32) -> Self {
        self.simplicity = strength;
        self
    }

    /// Set the focus blur radius.
    #[inline]
    pub fn focus_blur(mut self, radius: u32) -> Self {
        self.focus_blur = radius;
        self
    }

    /// Plan the active stages, in execution order.
    pub fn stages(&self) -> Vec<PrepStage> {
        let mut stages = Vec::new();
        if self.simplicity > 0 {
            stages.push(PrepStage::Smooth(self.simplicity));
        }
        if self.focus_blur > 0 {
            stages.push(PrepStage::FocusBlur(self.focus_blur));
        }
        stages
    }

    /// Run every active stage over the buffer, in order.
    pub fn run(&self, raster: Raster) -> Raster {
        self.stages()
            .into_iter()
            .fold(raster, |buffer, stage| stage.apply(buffer))
    }
}
