/// Default tuning parameters for a Pong match
///
/// Speeds are in play-area units per frame; sizes are ratios of the play area.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Geometry (ratios of the play area)
    pub const PADDLE_WIDTH_RATIO: f32 = 0.0125;
    pub const PADDLE_HEIGHT_RATIO: f32 = 1.0 / 6.0;
    pub const PADDLE_MARGIN_RATIO: f32 = 0.025;
    pub const BALL_SIZE_RATIO: f32 = 0.02; // of the shorter side

    // Paddle
    pub const PADDLE_SPEED: f32 = 6.0;

    // Ball
    pub const BALL_SPEED_INITIAL: f32 = 5.0;
    pub const BALL_SPEED_UP: f32 = 1.02; // dx multiplier on paddle hit
    pub const RESET_MIN_DY_RATIO: f32 = 1.0 / 6.0; // of BALL_SPEED_INITIAL

    // Score
    pub const MAX_SCORE: u8 = 10;

    // AI
    pub const AI_DECISION_INTERVAL_MS: f64 = 1000.0;
    pub const AI_INTERVAL_DECREMENT_MS: f64 = 10.0;
    pub const AI_INTERVAL_FLOOR_MS: f64 = 100.0;
}
