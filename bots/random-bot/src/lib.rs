use darts_core::{RngCore, ThrowContext, Thrower};
use rand::Rng;

/// Scores at or below this are played as a finish on a double.
const FINISHING_RANGE: u32 = 40;

/// RandomBot throws three darts at random segments of the board. From 40 or
/// less it goes for the finish: on an even score it hits the double with
/// probability `accuracy`, on an odd one it takes a single one to set up.
pub struct RandomBot {
    accuracy: f64,
}

impl RandomBot {
    /// Out-of-range accuracy is clamped to 0..=1; NaN counts as never hitting.
    pub fn new(accuracy: f64) -> Self {
        let accuracy = if accuracy.is_nan() {
            0.0
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self { accuracy }
    }

    fn dart(rng: &mut dyn RngCore) -> u32 {
        match rng.gen_range(0..22) {
            20 => 25,
            21 => 50,
            segment => (segment + 1) * rng.gen_range(1..=3),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Thrower for RandomBot {
    fn name(&self) -> &'static str {
        "random-bot"
    }

    fn throw(&self, ctx: &ThrowContext, rng: &mut dyn RngCore) -> u32 {
        let remaining = ctx.remaining;
        if remaining <= FINISHING_RANGE {
            if remaining % 2 == 1 {
                return 1;
            }
            return if rng.gen_bool(self.accuracy) {
                remaining
            } else {
                0
            };
        }
        (0..3).map(|_| Self::dart(rng)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darts_core::{simulate_set, Set, SetPhase, MAX_TURN_POINTS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx(remaining: u32) -> ThrowContext {
        ThrowContext {
            leg: 1,
            remaining,
            opponent_remaining: 501,
        }
    }

    #[test]
    fn visits_stay_on_the_board() {
        let bot = RandomBot::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let points = bot.throw(&ctx(501), &mut rng);
            assert!(points <= MAX_TURN_POINTS);
            assert!(points >= 3);
        }
    }

    #[test]
    fn perfect_accuracy_always_finishes() {
        let bot = RandomBot::new(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bot.throw(&ctx(40), &mut rng), 40);
        assert_eq!(bot.throw(&ctx(2), &mut rng), 2);
    }

    #[test]
    fn odd_finish_is_set_up_with_a_single() {
        let bot = RandomBot::new(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(bot.throw(&ctx(33), &mut rng), 1);
        assert_eq!(bot.throw(&ctx(1), &mut rng), 1);
    }

    #[test]
    fn zero_accuracy_never_finishes() {
        let bot = RandomBot::new(-3.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(bot.throw(&ctx(32), &mut rng), 0);
        }
    }

    #[test]
    fn nan_accuracy_never_finishes() {
        let bot = RandomBot::new(f64::NAN);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(bot.throw(&ctx(32), &mut rng), 0);
        }
        assert_eq!(RandomBot::new(f64::INFINITY).throw(&ctx(32), &mut rng), 32);
    }

    #[test]
    fn same_seed_plays_the_same_set() {
        let play = |seed| {
            let mut set = Set::default();
            set.start_new_set("", "", 301, 3);
            let bot = RandomBot::new(0.5);
            let mut rng = StdRng::seed_from_u64(seed);
            simulate_set(&mut set, [&bot, &bot], &mut rng, 10_000)
        };

        let first = play(99);
        assert_eq!(first, play(99));
        assert_eq!(first.phase, SetPhase::Finished);
        assert!(first.winner.is_some());
    }
}
