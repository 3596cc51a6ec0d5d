//! Shared transposition table.
//!
//! One table serves every searcher thread without locks. Each slot is a pair
//! of atomics: the packed payload, and the position hash XORed with that
//! payload. A probe recomputes the XOR and compares against the full 64-bit
//! hash, so both index collisions and torn writes read as a miss. Callers
//! must still re-verify a returned move against the current position before
//! playing it.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use chess::{ChessMove, Piece, Square};
use evaluation::scores::MATE;

/// Bound classification for a stored score.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    /// True minimax value (alpha < value < beta).
    Exact = 0,
    /// Value >= beta (fail high).
    Lower = 1,
    /// Value <= alpha (all moves failed low).
    Upper = 2,
}

/// Decoded view of one slot.
#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    /// Best move from a prior search of this position, packed; 0 when none.
    pub best_move: u16,
    /// Score in "distance from this node" form for mates.
    pub score: i16,
    /// Remaining depth the entry was searched to; -1 marks an empty slot.
    pub depth: i8,
    pub bound: Bound,
    /// Search generation that wrote the entry.
    pub generation: u8,
}

struct Slot {
    /// Position hash XORed with `data`.
    key: AtomicU64,
    data: AtomicU64,
}

const SLOT_BYTES: usize = 16;
const MIN_SLOTS: usize = 1024;
const EMPTY_DEPTH: i8 = -1;

pub struct TranspositionTable {
    slots: Vec<Slot>,
    mask: usize,
    generation: AtomicU8,
}

impl TranspositionTable {
    /// Creates a table with the largest power-of-two slot count that fits
    /// the requested size in megabytes.
    pub fn new(mb: usize) -> Self {
        let bytes = mb.max(1).saturating_mul(1024 * 1024);
        let wanted = (bytes / SLOT_BYTES).max(MIN_SLOTS);
        let count = if wanted.is_power_of_two() {
            wanted
        } else {
            wanted.next_power_of_two() >> 1
        };

        let empty = pack(TtEntry {
            best_move: 0,
            score: 0,
            depth: EMPTY_DEPTH,
            bound: Bound::Exact,
            generation: 0,
        });
        let slots = (0..count)
            .map(|_| Slot {
                key: AtomicU64::new(empty),
                data: AtomicU64::new(empty),
            })
            .collect();

        Self {
            slots,
            mask: count - 1,
            generation: AtomicU8::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ages the table at a game boundary. Nothing is wiped; the generation
    /// stamp only feeds future replacement decisions.
    pub fn new_generation(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the entry for `hash`, or `None` on an empty slot, a key
    /// mismatch, or a torn concurrent write.
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        let slot = &self.slots[(hash as usize) & self.mask];
        let key = slot.key.load(Ordering::Relaxed);
        let data = slot.data.load(Ordering::Relaxed);

        if key ^ data != hash {
            return None;
        }
        let entry = unpack(data);
        if entry.depth < 0 {
            return None;
        }
        Some(entry)
    }

    /// Depth-preferred store: an entry for the same position is only
    /// replaced by an equal or deeper result; any other occupant is
    /// overwritten. Races between threads are tolerated, not prevented.
    pub fn store(&self, hash: u64, best_move: u16, depth: i8, score: i16, bound: Bound) {
        let slot = &self.slots[(hash as usize) & self.mask];
        let key = slot.key.load(Ordering::Relaxed);
        let data = slot.data.load(Ordering::Relaxed);

        let same_position = key ^ data == hash;
        if same_position && depth < unpack(data).depth {
            return;
        }

        let packed = pack(TtEntry {
            best_move,
            score: score.clamp(-MATE, MATE),
            depth,
            bound,
            generation: self.generation.load(Ordering::Relaxed),
        });
        slot.data.store(packed, Ordering::Relaxed);
        slot.key.store(hash ^ packed, Ordering::Relaxed);
    }
}

// Payload layout: [50..58]=generation, [40..42]=bound, [32..40]=depth,
// [16..32]=score, [0..16]=move.
fn pack(entry: TtEntry) -> u64 {
    u64::from(entry.best_move)
        | (u64::from(entry.score as u16) << 16)
        | (u64::from(entry.depth as u8) << 32)
        | ((entry.bound as u64) << 40)
        | (u64::from(entry.generation) << 50)
}

fn unpack(data: u64) -> TtEntry {
    TtEntry {
        best_move: (data & 0xFFFF) as u16,
        score: (data >> 16) as u16 as i16,
        depth: (data >> 32) as u8 as i8,
        bound: match (data >> 40) & 0x3 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        },
        generation: ((data >> 50) & 0xFF) as u8,
    }
}

/// Packs a move into 16 bits: [15:12]=promotion, [11:6]=to, [5:0]=from.
/// Zero is the reserved "no move" sentinel (a1a1 is never legal).
pub fn pack_move(mv: Option<ChessMove>) -> u16 {
    match mv {
        Some(mv) => {
            let from = mv.get_source().to_index() as u16;
            let to = mv.get_dest().to_index() as u16;
            let promotion = match mv.get_promotion() {
                Some(Piece::Knight) => 1u16,
                Some(Piece::Bishop) => 2u16,
                Some(Piece::Rook) => 3u16,
                Some(Piece::Queen) => 4u16,
                _ => 0u16,
            };
            (from & 0x3F) | ((to & 0x3F) << 6) | ((promotion & 0x0F) << 12)
        }
        None => 0,
    }
}

/// Unpacks a 16-bit move code; `None` for the sentinel.
pub fn unpack_move(code: u16) -> Option<ChessMove> {
    if code == 0 {
        return None;
    }
    let from = unsafe { Square::new((code & 0x3F) as u8) };
    let to = unsafe { Square::new(((code >> 6) & 0x3F) as u8) };
    let promotion = match (code >> 12) & 0x0F {
        1 => Some(Piece::Knight),
        2 => Some(Piece::Bishop),
        3 => Some(Piece::Rook),
        4 => Some(Piece::Queen),
        _ => None,
    };
    Some(ChessMove::new(from, to, promotion))
}
