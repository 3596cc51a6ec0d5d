use std::str::FromStr;

use chess::{Board, ChessMove, MoveGen};

use super::commands::{GoParams, UciInput};

/// Turns raw UCI input lines into [`UciInput`] values. Anything malformed
/// decodes to `Unknown`; the engine never aborts on bad input.
#[derive(Default)]
pub struct Decoder {}

impl Decoder {
    pub fn new() -> Self {
        Self {}
    }

    pub fn decode(&self, input: &str) -> UciInput {
        match input {
            "uci" => UciInput::Uci,
            "isready" => UciInput::IsReady,
            "ucinewgame" => UciInput::UciNewGame,
            "d" | "print" => UciInput::Print,

            _ if input.starts_with("position") => self.decode_position(input),
            _ if input.starts_with("go") => self.decode_go(input),
            _ if input.starts_with("setoption") => self.decode_setoption(input),
            _ if input.starts_with("stop") => UciInput::Stop,
            _ if input.starts_with("quit") => UciInput::Quit,

            _ => UciInput::Unknown(input.to_string()),
        }
    }

    fn decode_position(&self, input: &str) -> UciInput {
        let mut board = if input.contains("fen") {
            // Everything between "fen" and "moves" (or the end of the line).
            let fen = input
                .split("fen")
                .nth(1)
                .unwrap_or("")
                .split("moves")
                .next()
                .unwrap_or("")
                .trim();
            match Board::from_str(fen) {
                Ok(board) => board,
                Err(_) => return UciInput::Unknown(input.to_string()),
            }
        } else {
            Board::default()
        };

        // Apply the move tail, stopping at the first token that is not a
        // legal move in the evolving position.
        if let Some(moves) = input.split("moves").nth(1) {
            for token in moves.split_whitespace() {
                match find_move(&board, token) {
                    Some(mv) => board = board.make_move_new(mv),
                    None => break,
                }
            }
        }

        UciInput::Position { board }
    }

    fn decode_setoption(&self, input: &str) -> UciInput {
        // setoption name <name> value <value>
        if let Some(name_start) = input.find("name ") {
            if let Some(value_start) = input.find(" value ") {
                let name = &input[name_start + 5..value_start];
                let value = &input[value_start + 7..];

                return UciInput::SetOption {
                    name: name.trim().to_string(),
                    value: value.trim().to_string(),
                };
            }
        }

        UciInput::Unknown(input.to_string())
    }

    fn decode_go(&self, input: &str) -> UciInput {
        UciInput::Go(GoParams {
            infinite: input.contains("infinite"),
            wtime: extract_numeric_param(input, "wtime"),
            btime: extract_numeric_param(input, "btime"),
            winc: extract_numeric_param(input, "winc"),
            binc: extract_numeric_param(input, "binc"),
            moves_to_go: extract_numeric_param(input, "movestogo"),
            depth: extract_numeric_param(input, "depth").map(|d| d.min(64) as u8),
            move_time: extract_numeric_param(input, "movetime"),
        })
    }
}

/// Finds the legal move matching a coordinate token such as `e2e4` or
/// `e7e8q`. Returns `None` for unparseable or illegal tokens.
fn find_move(board: &Board, token: &str) -> Option<ChessMove> {
    MoveGen::new_legal(board).find(|mv| mv.to_string() == token)
}

fn extract_numeric_param(input: &str, param: &str) -> Option<u64> {
    input
        .split_whitespace()
        .collect::<Vec<&str>>()
        .windows(2)
        .find(|window| window[0] == param)
        .and_then(|window| window[1].parse().ok())
}
