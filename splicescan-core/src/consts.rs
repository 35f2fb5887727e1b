// MaxEntScan motif geometry: 3 exonic + 6 intronic bases for donors,
// 20 intronic + 3 exonic bases for acceptors.
pub const DEFAULT_DONOR_WIDTH: usize = 9;
pub const DEFAULT_ACCEPTOR_WIDTH: usize = 23;

pub const DEFAULT_INFO_KEY: &str = "MOTIF_DELTA";
pub const SCORE_PRECISION: usize = 2;
pub const MISSING_VALUE: &str = ".";
