//! Replay Playback Controller
//!
//! Steps through a [`ReplayDoc`] one pitch at a time and drives the viewer
//! camera through an injected [`CameraControl`].

use super::types::{ReplayDoc, ReplayEntry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Viewer-frame point where the plate sits.
const PLATE: [f64; 3] = [-0.33, 0.3, 38.47];
/// Viewer-frame point near the mound (sensor x ≈ 55 ft).
const MOUND: [f64; 3] = [-0.33, 1.5, 24.5];

/// How long each pitch stays on screen at 1x speed.
pub const DEFAULT_DWELL_MS: f32 = 3000.0;

/// Receives camera updates from the controller.
///
/// The renderer implements this; the controller never touches global state.
pub trait CameraControl {
    fn apply(&mut self, transform: &CameraTransform);
}

impl<F: FnMut(&CameraTransform)> CameraControl for F {
    fn apply(&mut self, transform: &CameraTransform) {
        self(transform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CameraMode {
    /// Behind the plate, looking at the mound.
    Catcher,
    /// Behind the mound, looking at the plate.
    Pitcher,
    /// High above the infield.
    Overhead,
    /// Tracks where the ball ends up.
    BallFollow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CameraTransform {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub fov: f64,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: [PLATE[0], PLATE[1] + 1.2, PLATE[2] + 2.5],
            target: MOUND,
            fov: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PlaybackInfo {
    pub index: usize,
    pub total: usize,
    pub is_playing: bool,
    pub speed: f32,
    pub camera_mode: CameraMode,
}

pub struct ReplayController<C: CameraControl> {
    doc: ReplayDoc,
    camera: C,
    index: usize,
    is_playing: bool,
    playback_speed: f32,
    dwell_ms: f32,
    elapsed_ms: f32,
    camera_mode: CameraMode,
}

impl<C: CameraControl> ReplayController<C> {
    /// Positions on the first pitch and frames it.
    pub fn new(doc: ReplayDoc, camera: C) -> Self {
        let mut controller = Self {
            doc,
            camera,
            index: 0,
            is_playing: false,
            playback_speed: 1.0,
            dwell_ms: DEFAULT_DWELL_MS,
            elapsed_ms: 0.0,
            camera_mode: CameraMode::Catcher,
        };
        controller.refresh_camera();
        controller
    }

    pub fn doc(&self) -> &ReplayDoc {
        &self.doc
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn current(&self) -> Option<&ReplayEntry> {
        self.doc.entries.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn play(&mut self) {
        self.is_playing = !self.doc.is_empty();
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Returns `false` at the last pitch.
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.doc.len() {
            return false;
        }
        self.move_to(self.index + 1);
        true
    }

    /// Returns `false` at the first pitch.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.move_to(self.index - 1);
        true
    }

    /// Jump to `index`, clamped to the last pitch.
    pub fn seek(&mut self, index: usize) {
        if self.doc.is_empty() {
            return;
        }
        self.move_to(index.min(self.doc.len() - 1));
    }

    /// Jump to the first pitch of the next half inning.
    pub fn next_inning(&mut self) -> bool {
        match self.doc.inning_starts().into_iter().find(|&i| i > self.index) {
            Some(i) => {
                self.move_to(i);
                true
            }
            None => false,
        }
    }

    /// Advance playback by `delta_ms` of wall time. Stops after the last pitch.
    pub fn advance(&mut self, delta_ms: f32) -> Option<&ReplayEntry> {
        if self.is_playing {
            self.elapsed_ms += delta_ms.max(0.0) * self.playback_speed;
            while self.elapsed_ms >= self.dwell_ms {
                let carry = self.elapsed_ms - self.dwell_ms;
                if !self.next() {
                    self.is_playing = false;
                    self.elapsed_ms = 0.0;
                    break;
                }
                self.elapsed_ms = carry;
            }
        }
        self.current()
    }

    /// Playback speed (0.25x ~ 4x).
    /// Clamped to 0.25x..4x; non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            tracing::debug!(speed, "ignored non-finite playback speed");
            return;
        }
        self.playback_speed = speed.clamp(0.25, 4.0);
    }

    /// At least 1 ms per pitch; non-finite values are ignored.
    pub fn set_dwell_ms(&mut self, dwell_ms: f32) {
        if !dwell_ms.is_finite() {
            tracing::debug!(dwell_ms, "ignored non-finite dwell time");
            return;
        }
        self.dwell_ms = dwell_ms.max(1.0);
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
        self.refresh_camera();
    }

    pub fn camera_transform(&self) -> CameraTransform {
        match self.camera_mode {
            CameraMode::Catcher => CameraTransform::default(),
            CameraMode::Pitcher => CameraTransform {
                position: [MOUND[0], MOUND[1] + 1.0, MOUND[2] - 3.0],
                target: PLATE,
                fov: 40.0,
            },
            CameraMode::Overhead => CameraTransform {
                position: [0.0, 60.0, 20.0],
                target: [0.0, 0.0, 20.0],
                fov: 70.0,
            },
            CameraMode::BallFollow => match self.current().and_then(ReplayEntry::ball_end) {
                Some(end) => CameraTransform {
                    position: [end[0], end[1] + 8.0, end[2] + 10.0],
                    target: end,
                    fov: 55.0,
                },
                None => CameraTransform::default(),
            },
        }
    }

    pub fn playback_info(&self) -> PlaybackInfo {
        PlaybackInfo {
            index: self.index,
            total: self.doc.len(),
            is_playing: self.is_playing,
            speed: self.playback_speed,
            camera_mode: self.camera_mode,
        }
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.elapsed_ms = 0.0;
        self.refresh_camera();
    }

    fn refresh_camera(&mut self) {
        let transform = self.camera_transform();
        self.camera.apply(&transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HalfInning, PitchEvent};
    use crate::replay::build_replay;
    use crate::trajectory::CurveBuilder;

    #[derive(Default)]
    struct RecordingCamera {
        applied: Vec<CameraTransform>,
    }

    impl CameraControl for RecordingCamera {
        fn apply(&mut self, transform: &CameraTransform) {
            self.applied.push(*transform);
        }
    }

    fn doc(n: u16) -> ReplayDoc {
        let mut pitches: Vec<PitchEvent> =
            (1..=n).map(|i| PitchEvent::new("G", 1, HalfInning::Top, 1, i)).collect();
        pitches.push(PitchEvent::new("G", 1, HalfInning::Bottom, 1, 1));
        build_replay(&pitches, "G", &CurveBuilder::default()).unwrap()
    }

    #[test]
    fn test_stepping_notifies_camera() {
        let mut c = ReplayController::new(doc(3), RecordingCamera::default());
        assert_eq!(c.camera().applied.len(), 1);

        assert!(!c.previous());
        assert!(c.next());
        assert!(c.next());
        assert_eq!(c.index(), 2);
        assert!(c.previous());
        assert_eq!(c.camera().applied.len(), 4);

        c.seek(99);
        assert_eq!(c.index(), 3);
        assert!(!c.next());
    }

    #[test]
    fn test_next_inning() {
        let mut c = ReplayController::new(doc(3), RecordingCamera::default());
        assert!(c.next_inning());
        assert_eq!(c.current().map(|e| e.half), Some(HalfInning::Bottom));
        assert!(!c.next_inning());
    }

    #[test]
    fn test_autoplay_stops_at_end() {
        let mut c = ReplayController::new(doc(2), RecordingCamera::default());
        c.set_dwell_ms(100.0);
        c.play();
        c.advance(150.0);
        assert_eq!(c.index(), 1);
        c.set_speed(10.0);
        // speed clamps to 4x: 100ms -> 400ms -> past the last pitch
        c.advance(100.0);
        assert_eq!(c.index(), 2);
        assert!(!c.is_playing());
    }

    #[test]
    fn test_non_finite_timing_is_ignored() {
        let mut c = ReplayController::new(doc(2), RecordingCamera::default());
        c.set_dwell_ms(100.0);
        c.set_speed(2.0);
        c.set_speed(f32::NAN);
        c.set_speed(f32::INFINITY);
        c.set_dwell_ms(f32::NAN);
        c.set_dwell_ms(f32::INFINITY);
        assert_eq!(c.playback_info().speed, 2.0);

        // still 2x over a 100ms dwell
        c.play();
        c.advance(60.0);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_paused_controller_does_not_move() {
        let mut c = ReplayController::new(doc(2), RecordingCamera::default());
        c.advance(10_000.0);
        assert_eq!(c.index(), 0);
        c.toggle();
        assert!(c.is_playing());
        c.toggle();
        assert!(!c.is_playing());
    }

    #[test]
    fn test_closure_camera_and_mode_change() {
        let mut seen = Vec::new();
        {
            let mut c = ReplayController::new(doc(1), |t: &CameraTransform| seen.push(t.fov));
            c.set_camera_mode(CameraMode::Overhead);
            // no curves, so ball-follow falls back to the catcher view
            c.set_camera_mode(CameraMode::BallFollow);
            assert_eq!(c.playback_info().camera_mode, CameraMode::BallFollow);
        }
        assert_eq!(seen, vec![50.0, 70.0, 50.0]);
    }
}
