use chess::{Board, Color};
use uci::commands::GoParams;

/// Ceiling for `go infinite`; only the stop flag ends such a search.
const INFINITE_CEILING_MS: u64 = 24 * 60 * 60 * 1000;
/// Safety net for fixed-depth searches.
const DEPTH_SAFETY_MS: u64 = 30_000;
/// Assumed horizon in sudden-death time controls.
const DEFAULT_MOVES_TO_GO: u64 = 30;
/// Budget when `go` carries no clock information at all.
const NO_CLOCK_FALLBACK_MS: u64 = 500;

/// Hard resource bounds for one `go` command.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub time_ms: u64,
    pub depth: Option<u8>,
    pub infinite: bool,
}

impl SearchLimits {
    /// Derives a budget from the UCI `go` parameters. `movetime` is spent
    /// exactly, a depth cap gets a generous time ceiling, and clock play
    /// slices the remaining time by the moves-to-go horizon plus half the
    /// increment, clamped so the flag never falls.
    pub fn from_go(params: &GoParams, board: &Board) -> Self {
        if params.infinite {
            return Self {
                time_ms: INFINITE_CEILING_MS,
                depth: None,
                infinite: true,
            };
        }

        if let Some(move_time) = params.move_time {
            return Self {
                time_ms: move_time,
                depth: None,
                infinite: false,
            };
        }

        if let Some(depth) = params.depth.filter(|&d| d > 0) {
            return Self {
                time_ms: DEPTH_SAFETY_MS,
                depth: Some(depth),
                infinite: false,
            };
        }

        let (time_left, increment) = match board.side_to_move() {
            Color::White => (params.wtime, params.winc.unwrap_or(0)),
            Color::Black => (params.btime, params.binc.unwrap_or(0)),
        };

        let time_ms = match time_left {
            Some(my_time) => {
                let moves_to_go = params
                    .moves_to_go
                    .filter(|&mtg| mtg > 0)
                    .unwrap_or(DEFAULT_MOVES_TO_GO);
                let slice = my_time / moves_to_go;
                let budget = slice + increment / 2;
                budget.clamp(20, 50.max(my_time.saturating_sub(10)))
            }
            None => NO_CLOCK_FALLBACK_MS,
        };

        Self {
            time_ms,
            depth: None,
            infinite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(params: GoParams) -> SearchLimits {
        SearchLimits::from_go(&params, &Board::default())
    }

    #[test]
    fn movetime_is_spent_exactly() {
        let limits = go(GoParams {
            move_time: Some(750),
            ..Default::default()
        });
        assert_eq!(limits.time_ms, 750);
        assert_eq!(limits.depth, None);
        assert!(!limits.infinite);
    }

    #[test]
    fn depth_cap_gets_a_safety_ceiling() {
        let limits = go(GoParams {
            depth: Some(6),
            ..Default::default()
        });
        assert_eq!(limits.depth, Some(6));
        assert_eq!(limits.time_ms, DEPTH_SAFETY_MS);
    }

    #[test]
    fn infinite_only_stops_on_the_flag() {
        let limits = go(GoParams {
            infinite: true,
            ..Default::default()
        });
        assert!(limits.infinite);
        assert_eq!(limits.time_ms, INFINITE_CEILING_MS);
    }

    #[test]
    fn clock_play_slices_the_remaining_time() {
        // 60 s on the clock, 1 s increment, 20 moves to go:
        // 60000/20 + 1000/2 = 3500 ms.
        let limits = go(GoParams {
            wtime: Some(60_000),
            winc: Some(1_000),
            moves_to_go: Some(20),
            ..Default::default()
        });
        assert_eq!(limits.time_ms, 3_500);
    }

    #[test]
    fn desperate_clocks_still_get_a_sliver() {
        let limits = go(GoParams {
            wtime: Some(80),
            ..Default::default()
        });
        assert!(limits.time_ms >= 20);
        assert!(limits.time_ms <= 70);
    }

    #[test]
    fn the_black_clock_is_used_when_black_moves() {
        use std::str::FromStr;
        let board = Board::from_str("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let limits = SearchLimits::from_go(
            &GoParams {
                wtime: Some(1_000),
                btime: Some(90_000),
                ..Default::default()
            },
            &board,
        );
        // 90000/30 = 3000 ms, well above anything the white clock allows.
        assert_eq!(limits.time_ms, 3_000);
    }

    #[test]
    fn no_clock_at_all_falls_back_to_half_a_second() {
        let limits = go(GoParams::default());
        assert_eq!(limits.time_ms, NO_CLOCK_FALLBACK_MS);
    }
}
