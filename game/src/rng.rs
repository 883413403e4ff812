use crate::piece::PieceKind;

const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Xorshift64* generator. Same seed, same piece sequence.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        let seed = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.next_u32() as usize % PieceKind::ALL.len();
        PieceKind::from_index(index)
    }
}
