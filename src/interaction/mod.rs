use serde::{Deserialize, Serialize};

pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Idle,
    /// Pointer is down but has not moved past the click threshold yet.
    PendingThreshold,
    Dragging,
}

/// How a finished gesture should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragOutcome {
    Click,
    /// Raw horizontal delta from the pointer-down position.
    Commit { dx: f64 },
}

/// Toolkit-independent pointer gesture: `Idle -> PendingThreshold -> Dragging`.
///
/// Deltas are always measured from the pointer-down position, never summed
/// from successive moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    phase: DragPhase,
    threshold_px: f64,
    origin_x: f64,
    origin_y: f64,
    last_x: f64,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragGesture {
    #[must_use]
    pub fn new(threshold_px: f64) -> Self {
        let threshold_px = if threshold_px.is_finite() && threshold_px >= 0.0 {
            threshold_px
        } else {
            DEFAULT_DRAG_THRESHOLD_PX
        };
        Self {
            phase: DragPhase::Idle,
            threshold_px,
            origin_x: 0.0,
            origin_y: 0.0,
            last_x: 0.0,
        }
    }

    #[must_use]
    pub fn phase(self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn threshold_px(self) -> f64 {
        self.threshold_px
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Current raw delta, `0.0` unless dragging.
    #[must_use]
    pub fn delta_x(self) -> f64 {
        match self.phase {
            DragPhase::Dragging => self.last_x - self.origin_x,
            _ => 0.0,
        }
    }

    /// Starts a new gesture, discarding any unfinished one.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.phase = DragPhase::PendingThreshold;
        self.origin_x = x;
        self.origin_y = y;
        self.last_x = x;
    }

    /// Returns the raw delta once the gesture is a drag.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<f64> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::PendingThreshold => {
                let distance = (x - self.origin_x).hypot(y - self.origin_y);
                if distance < self.threshold_px {
                    return None;
                }
                self.phase = DragPhase::Dragging;
                self.last_x = x;
                Some(self.delta_x())
            }
            DragPhase::Dragging => {
                self.last_x = x;
                Some(self.delta_x())
            }
        }
    }

    /// Ends the gesture. Returns `None` when no gesture was active.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<DragOutcome> {
        let outcome = match self.phase {
            DragPhase::Idle => return None,
            DragPhase::PendingThreshold => {
                if (x - self.origin_x).hypot(y - self.origin_y) < self.threshold_px {
                    DragOutcome::Click
                } else {
                    DragOutcome::Commit {
                        dx: x - self.origin_x,
                    }
                }
            }
            DragPhase::Dragging => DragOutcome::Commit {
                dx: x - self.origin_x,
            },
        };
        self.phase = DragPhase::Idle;
        Some(outcome)
    }

    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_motion_is_a_click() {
        let mut gesture = DragGesture::new(5.0);
        gesture.pointer_down(100.0, 10.0);
        assert_eq!(gesture.pointer_move(102.0, 11.0), None);
        assert_eq!(gesture.phase(), DragPhase::PendingThreshold);
        assert_eq!(gesture.pointer_up(103.0, 10.0), Some(DragOutcome::Click));
        assert_eq!(gesture.phase(), DragPhase::Idle);
    }

    #[test]
    fn deltas_are_measured_from_origin() {
        let mut gesture = DragGesture::new(5.0);
        gesture.pointer_down(100.0, 10.0);
        assert_eq!(gesture.pointer_move(120.0, 10.0), Some(20.0));
        assert_eq!(gesture.pointer_move(130.0, 10.0), Some(30.0));
        assert_eq!(gesture.pointer_move(90.0, 10.0), Some(-10.0));
        assert_eq!(
            gesture.pointer_up(95.0, 10.0),
            Some(DragOutcome::Commit { dx: -5.0 })
        );
        assert_eq!(gesture.pointer_up(95.0, 10.0), None);
    }
}
