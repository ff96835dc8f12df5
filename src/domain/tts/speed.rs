/// Rate the synthesis service treats as "normal"
pub const NEUTRAL_SPEED: f32 = 1.0;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 1.5;

/// The service only knows two rates, so any slider value collapses to
/// slow (`speed < 1.0`) or normal. Values above 1.0 do not speed speech up.
pub fn is_slow(speed: f32) -> bool {
    speed < NEUTRAL_SPEED
}
