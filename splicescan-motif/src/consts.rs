/// Returned by scorers for windows they cannot score (e.g. containing `N`).
pub const SENTINEL_SCORE: f64 = f64::NEG_INFINITY;

/// Pseudocount used when converting probabilities to log-odds.
pub const MIN_PROBABILITY: f64 = 1e-6;

/// Value of the entries inserted into a variant score array for deleted bases.
pub const PADDING_SCORE: f64 = 0.0;
