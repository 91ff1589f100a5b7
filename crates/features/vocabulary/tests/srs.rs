use chrono::{TimeDelta, TimeZone, Utc};
use gems_vocabulary::srs::{ReviewState, SPACED_REPETITION_INTERVALS, due_items, summarize};
use proptest::prelude::*;

#[test]
fn intervals_follow_the_ladder() {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let mut state = ReviewState::new("la manzana");
    assert!(state.is_due(start));

    let mut now = start;
    for expected in [3, 7, 14, 30, 90, 90] {
        state.record(true, now);
        assert_eq!(state.next_review, Some(now + TimeDelta::days(expected)));
        now += TimeDelta::days(expected);
    }
    assert!(state.is_mastered());

    state.record(false, now);
    assert_eq!(state.level, 4);
    assert_eq!(state.next_review, Some(now + TimeDelta::days(30)));
    assert!(!state.is_due(now + TimeDelta::days(29)));
    assert!(state.is_due(now + TimeDelta::days(30)));
}

#[test]
fn due_items_are_sorted_by_next_review() {
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    let at = |days: i64| Some(now + TimeDelta::days(days));
    let states = vec![
        ReviewState { next_review: at(-1), ..ReviewState::new("yesterday") },
        ReviewState { next_review: at(2), ..ReviewState::new("later") },
        ReviewState::new("new"),
        ReviewState { next_review: at(-5), level: 4, correct: 4, ..ReviewState::new("overdue") },
        ReviewState { next_review: at(0), ..ReviewState::new("now") },
    ];

    let ids: Vec<String> = due_items(&states, now).into_iter().map(|s| s.item_id).collect();
    assert_eq!(ids, ["new", "overdue", "yesterday", "now"]);

    let summary = summarize(&states, now);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.due, 4);
    assert_eq!(summary.mastered, 1);
    assert_eq!(summary.accuracy, 100);
}

proptest! {
    #[test]
    fn level_stays_on_the_ladder(outcomes in prop::collection::vec(any::<bool>(), 0..40)) {
        let now = Utc::now();
        let mut state = ReviewState::new("word");
        for correct in &outcomes {
            state.record(*correct, now);
            let days = SPACED_REPETITION_INTERVALS[usize::from(state.level)];
            prop_assert_eq!(state.next_review, Some(now + TimeDelta::days(days)));
        }
        prop_assert!(state.level <= 5);
        prop_assert_eq!((state.correct + state.incorrect) as usize, outcomes.len());
    }
}

#[test]
fn counters_saturate_instead_of_overflowing() {
    let now = Utc::now();
    let mut state = ReviewState { correct: u32::MAX, incorrect: u32::MAX, level: 3, ..ReviewState::new("agua") };
    state.record(true, now);
    state.record(false, now);
    assert_eq!((state.correct, state.incorrect), (u32::MAX, u32::MAX));
    assert_eq!(state.accuracy(), 50);

    let summary = summarize(&[state.clone(), state], now);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.accuracy, 50);
}
