pub mod hierarchy;
pub mod pitch;
pub mod season;
pub mod trajectory;

pub use hierarchy::{Game, Inning, PlateAppearance, Season};
pub use pitch::{
    BatterSide, HalfInning, HalfInningKey, HitType, HittingMetrics, PitchCall, PitchEvent,
    PitchingMetrics, PlateAppearanceKey, PlayResult, StrikeoutOrWalk,
};
pub use season::SeasonLabel;
pub use trajectory::{
    CoefficientSet, HitTrajectory, PitchTrajectory, HIT_COEFFICIENTS, PITCH_COEFFICIENTS,
};
