//! A lockable handle for sharing one set between callers.

use crate::set::Set;
use crate::snapshot::SetSnapshot;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle to a single set. Every operation runs under one lock,
/// so a leg win, the legs-won bump and the set-win check are seen together.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    inner: Arc<Mutex<Set>>,
}

impl Scoreboard {
    pub fn new(set: Set) -> Self {
        Self {
            inner: Arc::new(Mutex::new(set)),
        }
    }

    /// Run `f` with exclusive access to the set.
    pub fn with<R>(&self, f: impl FnOnce(&mut Set) -> R) -> R {
        // Operations never leave a set half-updated, so a poisoned lock
        // still guards a consistent value.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn snapshot(&self) -> SetSnapshot {
        self.with(|set| set.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TurnOutcome;
    use std::thread;

    #[test]
    fn clones_share_one_set() {
        let board = Scoreboard::default();
        let other = board.clone();

        board.with(|set| set.start_new_set("Ann", "Bob", 301, 3));
        other.with(|set| set.add_turn(100));

        assert_eq!(board.with(|set| set.remaining_score(1)), Some(201));
        assert_eq!(board.snapshot().current_player, "Bob");
    }

    #[test]
    fn concurrent_turns_keep_history_consistent() {
        let mut set = Set::default();
        set.start_new_set("Ann", "Bob", 100_000, 3);
        let board = Scoreboard::new(set);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let board = board.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let outcome = board.with(|set| set.add_turn(10));
                        assert!(matches!(outcome, TurnOutcome::Recorded { .. }));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        board.with(|set| {
            let leg = set.current_leg().unwrap();
            assert_eq!(leg.turns().len(), 200);
            assert_eq!(leg.remaining_score(1), 100_000 - 1_000);
            assert_eq!(leg.remaining_score(2), 100_000 - 1_000);
            assert_eq!(leg.current_player_index(), 0);
        });
    }
}
