use crate::types::{BattleResult, ResultRatios};

/// Running tallies for one battle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u64,
    pub damage: u32,
    pub correct: u64,
    pub incorrect: u64,
}

impl Scoreboard {
    pub fn hit(&mut self) {
        self.correct += 1;
    }

    pub fn miss(&mut self) {
        self.incorrect += 1;
    }

    pub fn keystrokes(&self) -> u64 {
        self.correct + self.incorrect
    }

    /// Correct keystrokes as a percentage, rounded to two decimals.
    /// Zero before any keystroke.
    pub fn accuracy(&self) -> f64 {
        let total = self.keystrokes();
        if total == 0 {
            return 0.0;
        }
        let percent = self.correct as f64 / total as f64 * 100.0;
        (percent * 100.0).round() / 100.0
    }

    pub fn result(&self, residues: u32, ratios: &ResultRatios) -> BattleResult {
        let accuracy = self.accuracy();
        let total = (self.score as f64 * ratios.raw_score).trunc() as u64
            + (accuracy * ratios.accuracy).trunc() as u64
            + (f64::from(residues) * ratios.residues).trunc() as u64;
        BattleResult {
            score: self.score,
            accuracy,
            residues,
            total,
        }
    }
}
