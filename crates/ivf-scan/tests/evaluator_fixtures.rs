use ivf_scan::{
    encode, evaluate, Evaluator, Ordering, PairDirection, RejectReason, SearchSpace, Verdict,
};

fn ordering(symbols: &[u8]) -> Ordering {
    Ordering::from_slice(symbols).unwrap()
}

#[test]
fn known_solution_is_accepted_at_its_index() {
    let solution = ordering(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]);
    assert_eq!(evaluate(&solution), Verdict::Accept);
    assert_eq!(encode(&solution).to_index(), 93_444_724);
    let intervals: Vec<i8> = solution.pair_intervals().collect();
    assert_eq!(intervals, vec![3, 4, 5, 7, 8, 9]);
}

#[test]
fn tritone_pair_is_not_allowed() {
    let verdict = evaluate(&ordering(&[4, 10, 5, 9, 1, 6, 3, 7, 0, 8, 2, 11]));
    assert_eq!(
        verdict,
        Verdict::Reject {
            pair: Some(0),
            reason: RejectReason::NotAllowed,
        }
    );
}

#[test]
fn descending_pair_rejected_only_when_ascending_required() {
    let descending = ordering(&[7, 4, 9, 5, 1, 6, 10, 3, 0, 8, 11, 2]);
    assert_eq!(
        evaluate(&descending),
        Verdict::Reject {
            pair: Some(0),
            reason: RejectReason::Descending,
        }
    );
    let mut either = Evaluator::new(&SearchSpace::chromatic(), PairDirection::Either);
    assert_eq!(either.evaluate(&descending), Verdict::Accept);
}

#[test]
fn repeated_interval_names_second_occurrence() {
    let verdict = evaluate(&ordering(&[0, 3, 1, 4, 2, 7, 5, 10, 6, 11, 8, 9]));
    assert_eq!(
        verdict,
        Verdict::Reject {
            pair: Some(1),
            reason: RejectReason::Repeated,
        }
    );
}

#[test]
fn evaluator_state_does_not_leak_between_orderings() {
    let mut evaluator = Evaluator::new(&SearchSpace::chromatic(), PairDirection::Ascending);
    let solution = ordering(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]);
    let rejected = ordering(&[0, 3, 1, 4, 2, 7, 5, 10, 6, 11, 8, 9]);
    for _ in 0..3 {
        assert!(evaluator.evaluate(&solution).is_accept());
        assert!(!evaluator.evaluate(&rejected).is_accept());
    }
}

#[test]
fn verdict_serializes_with_tag() {
    let json = serde_json::to_string(&Verdict::Reject {
        pair: Some(2),
        reason: RejectReason::NotAllowed,
    })
    .unwrap();
    assert_eq!(json, r#"{"verdict":"reject","pair":2,"reason":"not-allowed"}"#);
}
