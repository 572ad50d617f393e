/// Best-effort persistence of the campaign high score.
///
/// Implementations never fail: unreadable storage reads as `0`, and writes that
/// cannot be stored are dropped.
pub trait HighScoreStore {
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

/// Ephemeral store, the high score lives as long as the process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    pub const fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn set_high_score(&mut self, score: u32) {
        self.high_score = score;
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn high_score(&self) -> u32 {
        (**self).high_score()
    }

    fn set_high_score(&mut self, score: u32) {
        (**self).set_high_score(score)
    }
}
