use ivf_scan::{
    search, IntervalSet, NeverStop, NoProgress, PairDirection, SearchSpace, Solution,
};

fn space(symbols: usize, intervals: &[u8]) -> SearchSpace {
    SearchSpace::new(symbols, IntervalSet::from_slice(intervals)).unwrap()
}

fn permutations(symbols: usize) -> Vec<Vec<u8>> {
    fn extend(prefix: &mut Vec<u8>, left: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
        if left.is_empty() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..left.len() {
            let symbol = left.remove(i);
            prefix.push(symbol);
            extend(prefix, left, out);
            prefix.pop();
            left.insert(i, symbol);
        }
    }
    let mut out = Vec::new();
    extend(&mut Vec::new(), &mut (0..symbols as u8).collect(), &mut out);
    out
}

fn brute_force(symbols: usize, intervals: &[u8], direction: PairDirection) -> usize {
    permutations(symbols)
        .into_iter()
        .filter(|perm| {
            let mut used: Vec<u8> = perm
                .chunks(2)
                .filter_map(|pair| {
                    let (a, b) = (pair[0] as i16, pair[1] as i16);
                    let diff = match direction {
                        PairDirection::Ascending => b - a,
                        PairDirection::Either => (b - a).abs(),
                    };
                    u8::try_from(diff).ok().filter(|d| *d > 0)
                })
                .collect();
            if used.len() != perm.len() / 2 {
                return false;
            }
            used.sort_unstable();
            let mut required = intervals.to_vec();
            required.sort_unstable();
            used == required
        })
        .count()
}

fn scan(symbols: usize, intervals: &[u8], direction: PairDirection) -> Vec<Solution> {
    let outcome = search(
        &space(symbols, intervals),
        direction,
        &mut NoProgress,
        &NeverStop,
    );
    assert!(outcome.completed);
    outcome.solutions
}

#[test]
fn scan_agrees_with_brute_force() {
    let cases: [(usize, &[u8]); 6] = [
        (4, &[1, 2]),
        (4, &[1, 3]),
        (6, &[1, 2, 3]),
        (6, &[1, 3, 5]),
        (8, &[1, 3, 5, 7]),
        (8, &[2, 3, 5, 6]),
    ];
    for (symbols, intervals) in cases {
        for direction in [PairDirection::Ascending, PairDirection::Either] {
            assert_eq!(
                scan(symbols, intervals, direction).len(),
                brute_force(symbols, intervals, direction),
                "{symbols} symbols {intervals:?} {direction:?}"
            );
        }
    }
}

#[test]
fn known_reduced_counts() {
    assert!(scan(4, &[1, 2], PairDirection::Ascending).is_empty());
    assert_eq!(scan(4, &[1, 3], PairDirection::Either).len(), 8);
    assert_eq!(scan(6, &[1, 3, 5], PairDirection::Either).len(), 48);
    assert_eq!(scan(8, &[1, 3, 5, 7], PairDirection::Ascending).len(), 24);
    assert_eq!(scan(8, &[1, 3, 5, 7], PairDirection::Either).len(), 384);
    assert_eq!(scan(8, &[2, 3, 5, 6], PairDirection::Ascending).len(), 48);
    assert_eq!(scan(8, &[2, 3, 5, 6], PairDirection::Either).len(), 768);
}

#[test]
fn six_symbol_solutions_in_counter_order() {
    let found: Vec<(u64, Vec<u8>)> = scan(6, &[1, 3, 5], PairDirection::Ascending)
        .into_iter()
        .map(|s| (s.index, s.ordering.as_slice().to_vec()))
        .collect();
    assert_eq!(
        found,
        vec![
            (164, vec![2, 3, 1, 4, 0, 5]),
            (169, vec![1, 4, 2, 3, 0, 5]),
            (174, vec![0, 5, 2, 3, 1, 4]),
            (254, vec![2, 3, 0, 5, 1, 4]),
            (259, vec![1, 4, 0, 5, 2, 3]),
            (264, vec![0, 5, 1, 4, 2, 3]),
        ]
    );
}

#[test]
fn eight_symbol_first_solution() {
    let solutions = scan(8, &[1, 3, 5, 7], PairDirection::Ascending);
    assert_eq!(solutions[0].index, 9211);
    assert_eq!(solutions[0].ordering.as_slice(), &[3, 4, 2, 5, 1, 6, 0, 7]);
    assert!(solutions.windows(2).all(|w| w[0].index < w[1].index));
}
