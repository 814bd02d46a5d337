/// Errors raised while setting up a match.
///
/// The per-frame path never fails; everything here is caught before the
/// first tick.
#[derive(thiserror::Error, Debug)]
pub enum MatchError {
    #[error("invalid play area: {0}")]
    InvalidPlayArea(String),
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("resumed score {left}-{right} must stay below the max score {max}")]
    InvalidScore { left: u8, right: u8, max: u8 },
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
