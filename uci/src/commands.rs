use chess::{Board, ChessMove};

/// The bestmove reply when no legal move exists.
pub const NULL_MOVE: &str = "0000";

#[derive(Debug)]
pub enum UciInput {
    Uci,
    IsReady,

    UciNewGame,
    Position { board: Board },
    Go(GoParams),

    Stop,
    Quit,
    Print,
    SetOption { name: String, value: String },
    Unknown(String),
}

#[derive(Debug)]
pub enum UciOutput {
    IdName(String),
    IdAuthor(String),
    UciOk,
    ReadyOk,
    BestMove(String),
    Info(Info),
    Option(String),
    Raw(String),
}

#[derive(Debug, Default)]
pub struct Info {
    pub depth: u8,
    pub nodes: u64,
    pub nodes_per_second: u64,
    pub time: u64,
    pub pv: Vec<ChessMove>,
    pub score: Score,
}

#[derive(Debug)]
pub enum Score {
    /// Centipawns from the engine's point of view.
    Centipawns(i16),
    /// Full moves to mate; negative when the engine is getting mated.
    Mate(i16),
}

impl Default for Score {
    fn default() -> Self {
        Score::Centipawns(0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct GoParams {
    // Search in the background until a stop command is received.
    pub infinite: bool,

    // Milliseconds left on each clock.
    pub wtime: Option<u64>,
    pub btime: Option<u64>,

    // Fisher increments.
    pub winc: Option<u64>,
    pub binc: Option<u64>,

    // Moves to the next time control; sudden death when absent.
    pub moves_to_go: Option<u64>,

    // Search this many plies only.
    pub depth: Option<u8>,

    // Search exactly this many milliseconds.
    pub move_time: Option<u64>,
}
