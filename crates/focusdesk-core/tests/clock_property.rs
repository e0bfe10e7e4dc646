//! Property tests for the activity clock: accounting stays lossless and
//! countdowns stay in range under arbitrary command interleavings.

use std::collections::HashMap;

use proptest::prelude::*;

use focusdesk_core::category::Category;
use focusdesk_core::clock::{ActivityClock, ClockConfig};

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Pause,
    Resume,
    Switch(Category),
    Add(i64),
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Task),
        Just(Category::Break),
        Just(Category::LongBreak),
        Just(Category::Meeting),
        Just(Category::Lunch),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => Just(Op::Tick),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        2 => category_strategy().prop_map(Op::Switch),
        1 => (-600i64..=600).prop_map(Op::Add),
    ]
}

proptest! {
    /// Every delivered tick is credited to exactly one category; the sum
    /// of per-category totals equals the number of ticks that accrued.
    #[test]
    fn accumulation_is_lossless(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let config = ClockConfig::new(45, 15).unwrap();
        let mut clock = ActivityClock::new(config);
        let mut per_category: HashMap<Category, i64> = HashMap::new();
        let mut delivered = 0i64;

        for op in ops {
            match op {
                Op::Tick => {
                    if let Some(outcome) = clock.tick() {
                        delivered += 1;
                        *per_category.entry(outcome.accrued).or_insert(0) += 1;
                    } else {
                        prop_assert!(!clock.is_running());
                    }
                }
                Op::Pause => { clock.pause(); }
                Op::Resume => { clock.resume(); }
                Op::Switch(category) => { clock.switch_to(category); }
                Op::Add(secs) => { clock.add_seconds(secs); }
            }
        }

        prop_assert_eq!(per_category.values().sum::<i64>(), delivered);
    }

    /// A countdown category never shows a non-positive remaining time from
    /// the outside: expiry transitions re-arm the counter in the same tick,
    /// and downward adjustments floor at one second.
    #[test]
    fn countdown_remaining_stays_positive(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        let config = ClockConfig::new(30, 10).unwrap();
        let mut clock = ActivityClock::new(config);

        for op in ops {
            match op {
                Op::Tick => { clock.tick(); }
                Op::Pause => { clock.pause(); }
                Op::Resume => { clock.resume(); }
                Op::Switch(category) => { clock.switch_to(category); }
                Op::Add(secs) => { clock.add_seconds(secs); }
            }
            if clock.category().counts_up() {
                prop_assert!(clock.remaining_secs() >= 0);
            } else {
                prop_assert!(clock.remaining_secs() >= 1);
            }
        }
    }

    /// Expiry always lands on Task or Break, never on a count-up category,
    /// and always leaves the clock running.
    #[test]
    fn expiry_targets_are_stable(ticks in 1usize..200) {
        let config = ClockConfig::new(7, 3).unwrap();
        let mut clock = ActivityClock::new(config);

        for _ in 0..ticks {
            let outcome = clock.tick().unwrap();
            if let Some(transition) = outcome.transition {
                prop_assert!(transition.automatic);
                prop_assert!(matches!(transition.to, Category::Task | Category::Break));
                prop_assert!(clock.is_running());
                prop_assert_eq!(clock.remaining_secs(), clock.config().initial_secs(transition.to));
            }
        }
    }
}
