use rand::Rng;

use crate::fingerboard;

/// One question: a target note and whether it still accepts an answer.
pub struct Round {
    pub target: &'static str,
    awaiting_answer: bool,
}

#[derive(Clone, Copy, Default)]
pub struct SessionScore {
    pub correct: u32,
    pub total: u32,
}

/// What the UI needs to show after an answer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Outcome {
    pub correct: bool,
    pub target: &'static str,
}

/// The whole mutable game state: current round plus session counters.
/// Idle -> Awaiting-Answer (start_round) -> Answered (submit_answer).
#[derive(Default)]
pub struct Game {
    round: Option<Round>,
    pub score: SessionScore,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a uniformly random note off the board and open a new round,
    /// replacing whatever round came before. Returns the target so the
    /// caller can queue its playback.
    pub fn start_round<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let notes = fingerboard::catalog();
        let target = notes[rng.random_range(0..notes.len())];
        self.round = Some(Round {
            target,
            awaiting_answer: true,
        });
        target
    }

    /// Grade a pressed note against the current target. Returns `None` when
    /// no answer is due (no round, or already answered) so duplicate and
    /// late presses cannot touch the counters.
    pub fn submit_answer(&mut self, selected: &str) -> Option<Outcome> {
        let round = self.round.as_mut().filter(|r| r.awaiting_answer)?;
        round.awaiting_answer = false;
        let correct = selected == round.target;
        self.score.total += 1;
        if correct {
            self.score.correct += 1;
        }
        Some(Outcome {
            correct,
            target: round.target,
        })
    }

    /// Current target for a repeat listen, answered or not. No mutation.
    pub fn replay(&self) -> Option<&'static str> {
        self.round.as_ref().map(|r| r.target)
    }

    pub fn awaiting(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.awaiting_answer)
    }

    /// Close the session: hand back the counters and reset to idle.
    pub fn end_session(&mut self) -> SessionScore {
        self.round = None;
        std::mem::take(&mut self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn correct_answer_scores_once() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(7);
        let target = game.start_round(&mut rng);
        assert!(game.awaiting());

        let outcome = game.submit_answer(target).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.target, target);
        assert_eq!(game.score.correct, 1);
        assert_eq!(game.score.total, 1);
        assert!(!game.awaiting());
    }

    #[test]
    fn wrong_answer_counts_the_round_only() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(7);
        let target = game.start_round(&mut rng);
        let wrong = if target == "G3" { "A3" } else { "G3" };

        let outcome = game.submit_answer(wrong).unwrap();
        assert!(!outcome.correct);
        assert_eq!(game.score.correct, 0);
        assert_eq!(game.score.total, 1);
    }

    #[test]
    fn e5_round_answered_e5_is_correct() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(0);
        while game.start_round(&mut rng) != "E5" {}

        let outcome = game.submit_answer("E5").unwrap();
        assert_eq!(outcome, Outcome { correct: true, target: "E5" });
        assert_eq!(game.score.correct, game.score.total);
    }

    #[test]
    fn second_answer_to_the_same_round_is_ignored() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(3);
        let target = game.start_round(&mut rng);

        assert!(game.submit_answer(target).is_some());
        assert!(game.submit_answer(target).is_none());
        assert_eq!(game.score.total, 1);
        assert_eq!(game.score.correct, 1);
    }

    #[test]
    fn answer_without_a_round_is_ignored() {
        let mut game = Game::new();
        assert!(game.submit_answer("E5").is_none());
        assert_eq!(game.score.total, 0);
    }

    #[test]
    fn replay_keeps_the_target_and_counters() {
        let mut game = Game::new();
        assert_eq!(game.replay(), None);

        let mut rng = StdRng::seed_from_u64(11);
        let target = game.start_round(&mut rng);
        assert_eq!(game.replay(), Some(target));
        assert!(game.awaiting());

        game.submit_answer(target);
        // Still replayable after the reveal, but no longer scoreable.
        assert_eq!(game.replay(), Some(target));
        assert_eq!(game.score.total, 1);
    }

    #[test]
    fn end_session_resets_everything() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(5);
        let target = game.start_round(&mut rng);
        game.submit_answer(target);

        let score = game.end_session();
        assert_eq!(score.total, 1);
        assert_eq!(game.score.total, 0);
        assert_eq!(game.replay(), None);
    }

    #[test]
    fn every_note_comes_up_roughly_uniformly() {
        use std::collections::HashMap;

        let notes = crate::fingerboard::catalog();
        let trials = 5_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..trials {
            *counts.entry(game.start_round(&mut rng)).or_default() += 1;
        }

        let expected = trials / notes.len() as u32;
        for note in &notes {
            let n = counts.get(note).copied().unwrap_or(0);
            assert!(n > expected / 2, "{note} drawn {n} times, expected ~{expected}");
            assert!(n < expected * 2, "{note} drawn {n} times, expected ~{expected}");
        }
    }
}
