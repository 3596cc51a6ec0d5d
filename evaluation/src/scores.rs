//! Score constants and the mate-distance encoding shared by the search and
//! the transposition table.

/// Window sentinel for alpha-beta. Strictly below [`MATE`] so that mate
/// scores survive a full-width window.
pub const INF: i16 = 30_000;

/// Base value for checkmate. A mate in N plies from the root scores
/// `MATE - N`, so faster mates rank higher.
pub const MATE: i16 = 32_000;

/// Scores within this distance of [`MATE`] carry a ply count to mate.
pub const MATE_IN_MAX: i16 = 10_000;

#[inline]
pub fn mate_score(ply: usize) -> i16 {
    MATE - ply as i16
}

#[inline]
pub fn is_mate_score(score: i16) -> bool {
    score > MATE - MATE_IN_MAX || score < -MATE + MATE_IN_MAX
}

/// Re-targets a mate score from "plies from the root" to "plies from this
/// node" before it is stored in the transposition table. Non-mate scores
/// pass through unchanged.
#[inline]
pub fn to_tt(score: i16, ply: usize) -> i16 {
    if score > MATE - MATE_IN_MAX {
        score + ply as i16
    } else if score < -MATE + MATE_IN_MAX {
        score - ply as i16
    } else {
        score
    }
}

/// Inverse of [`to_tt`], applied when a stored score is read back at a
/// (possibly different) ply.
#[inline]
pub fn from_tt(score: i16, ply: usize) -> i16 {
    if score > MATE - MATE_IN_MAX {
        score - ply as i16
    } else if score < -MATE + MATE_IN_MAX {
        score + ply as i16
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tt_encoding_round_trips() {
        for &score in &[0i16, 1, -1, 250, -250, 9_999, -9_999] {
            for ply in [0usize, 1, 5, 64, 127] {
                assert_eq!(from_tt(to_tt(score, ply), ply), score);
            }
        }
    }

    #[test]
    fn tt_encoding_round_trips_for_mate_scores() {
        for ply in [0usize, 1, 3, 17, 64] {
            let winning = mate_score(ply + 4);
            let losing = -mate_score(ply + 4);
            assert_eq!(from_tt(to_tt(winning, ply), ply), winning);
            assert_eq!(from_tt(to_tt(losing, ply), ply), losing);
        }
    }

    #[test]
    fn mate_scores_are_classified() {
        assert!(is_mate_score(mate_score(1)));
        assert!(is_mate_score(-mate_score(12)));
        assert!(!is_mate_score(0));
        assert!(!is_mate_score(INF - MATE_IN_MAX));
    }

    #[test]
    fn faster_mates_score_higher() {
        assert!(mate_score(1) > mate_score(3));
        assert!(mate_score(1) < MATE);
        assert!(mate_score(1) > INF);
    }
}
