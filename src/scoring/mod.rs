// Scoring: weighted signature distance and nearest-neighbor matching.

pub mod distance;
pub mod matcher;
