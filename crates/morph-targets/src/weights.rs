//! Blend weights and the active shape selection.

/// Amount a single key press moves the active weight.
pub const WEIGHT_STEP: f32 = 0.05;

/// Direction of a weight or selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One weight per blend shape plus the index currently being edited.
///
/// Weights always stay in `[0, 1]` and the active index always addresses a
/// valid weight (or is zero when there are none).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightState {
    weights: Vec<f32>,
    active: usize,
}

impl WeightState {
    /// All-zero weights for `shape_count` blend shapes.
    #[must_use]
    pub fn new(shape_count: usize) -> Self {
        Self {
            weights: vec![0.0; shape_count],
            active: 0,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Weight of the active shape, if there is one.
    #[must_use]
    pub fn active_weight(&self) -> Option<f32> {
        self.weights.get(self.active).copied()
    }

    /// Move the selection, clamping at either end.
    pub fn change_active_weight(&mut self, direction: Direction) {
        let last = self.weights.len().saturating_sub(1);
        self.active = match direction {
            Direction::Up => (self.active + 1).min(last),
            Direction::Down => self.active.saturating_sub(1),
        };
        tracing::debug!("Active weight {}", self.active);
    }

    /// Step the active weight by [`WEIGHT_STEP`], clamped to `[0, 1]`.
    pub fn change_weight(&mut self, direction: Direction) {
        let Some(weight) = self.weights.get_mut(self.active) else {
            return;
        };
        let step = match direction {
            Direction::Up => WEIGHT_STEP,
            Direction::Down => -WEIGHT_STEP,
        };
        *weight = (*weight + step).clamp(0.0, 1.0);
        tracing::debug!("Weight {} = {:.2}", self.active, *weight);
    }

    /// Zero every weight. The selection is left alone.
    pub fn reset_weights(&mut self) {
        self.weights.fill(0.0);
    }
}
