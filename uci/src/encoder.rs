use super::commands::{Score, UciOutput};

/// Renders [`UciOutput`] values as protocol lines.
#[derive(Default)]
pub struct Encoder {}

impl Encoder {
    pub fn encode(&self, response: &UciOutput) -> String {
        match response {
            UciOutput::IdName(name) => format!("id name {}", name),
            UciOutput::IdAuthor(author) => format!("id author {}", author),

            UciOutput::UciOk => "uciok".to_string(),
            UciOutput::ReadyOk => "readyok".to_string(),

            UciOutput::BestMove(best_move) => format!("bestmove {}", best_move),
            UciOutput::Info(info) => {
                let pv = info
                    .pv
                    .iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!(
                    "info depth {} score {} nodes {} nps {} time {} pv {}",
                    info.depth,
                    match info.score {
                        Score::Centipawns(cp) => format!("cp {}", cp),
                        Score::Mate(moves) => format!("mate {}", moves),
                    },
                    info.nodes,
                    info.nodes_per_second,
                    info.time,
                    pv,
                )
            }
            UciOutput::Option(option) => option.clone(),
            UciOutput::Raw(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Info;
    use chess::{ChessMove, Square};

    #[test]
    fn encodes_info_lines() {
        let encoder = Encoder::default();
        let info = Info {
            depth: 7,
            nodes: 12_345,
            nodes_per_second: 1_000_000,
            time: 12,
            pv: vec![ChessMove::new(Square::E2, Square::E4, None)],
            score: Score::Centipawns(33),
        };
        assert_eq!(
            encoder.encode(&UciOutput::Info(info)),
            "info depth 7 score cp 33 nodes 12345 nps 1000000 time 12 pv e2e4"
        );
    }

    #[test]
    fn encodes_mate_scores() {
        let encoder = Encoder::default();
        let info = Info {
            depth: 3,
            score: Score::Mate(1),
            ..Default::default()
        };
        let line = encoder.encode(&UciOutput::Info(info));
        assert!(line.contains("score mate 1"));
    }

    #[test]
    fn encodes_bestmove() {
        let encoder = Encoder::default();
        assert_eq!(
            encoder.encode(&UciOutput::BestMove("a1a8".to_string())),
            "bestmove a1a8"
        );
    }
}
