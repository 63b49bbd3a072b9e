pub mod controller;
pub mod types;

pub use controller::{
    CameraControl, CameraMode, CameraTransform, PlaybackInfo, ReplayController, DEFAULT_DWELL_MS,
};
pub use types::{build_replay, count_label, ReplayDoc, ReplayEntry};
