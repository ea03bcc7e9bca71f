//! RNG oracle for the action roll.
//!
//! The engine never reaches for ambient randomness: every roll goes through
//! an [`RngOracle`] supplied by the caller. Production callers seed a
//! [`PcgRng`]; tests pin outcomes with [`FixedRoll`] or [`ScriptedRolls`].

/// Source of random numbers for action resolution.
pub trait RngOracle: Send {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit state, 32-bit output. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let output = Self::pcg_output(self.state);
        self.state = Self::pcg_step(self.state);
        output
    }
}

/// Always rolls the same face, clamped into `[1, sides]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRoll(pub u32);

impl RngOracle for FixedRoll {
    fn next_u32(&mut self) -> u32 {
        self.0.saturating_sub(1)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.0.clamp(1, sides.max(1))
    }
}

/// Replays a fixed sequence of faces, cycling when exhausted.
///
/// Each face is clamped into `[1, sides]`. An empty script always rolls 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRolls {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            cursor: 0,
        }
    }

    fn next_face(&mut self) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}

impl RngOracle for ScriptedRolls {
    fn next_u32(&mut self) -> u32 {
        self.next_face().saturating_sub(1)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.next_face().clamp(1, sides.max(1))
    }
}
