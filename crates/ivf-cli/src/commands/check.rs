use std::error::Error;

use clap::Args;
use ivf_export::{interval_name, note_name};
use ivf_scan::{encode, Evaluator, Ordering, PairDirection, SearchSpace, Verdict};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The twelve symbols (0-11) of the ordering, in order.
    #[arg(required = true, num_args = 12, value_name = "SYMBOL")]
    pub symbols: Vec<u8>,
    /// Measure pairs by absolute difference instead of requiring ascent.
    #[arg(long)]
    pub either: bool,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let ordering = Ordering::from_slice(&args.symbols)?;
    let direction = if args.either {
        PairDirection::Either
    } else {
        PairDirection::Ascending
    };
    let mut evaluator = Evaluator::new(&SearchSpace::chromatic(), direction);
    let verdict = evaluator.evaluate(&ordering);

    let notes: Vec<&str> = ordering.as_slice().iter().map(|&s| note_name(s)).collect();
    println!("Index:     {}", encode(&ordering).to_index());
    println!("Notes:     {}", notes.join(" "));
    for (pair, ((first, second), interval)) in ordering
        .pairs()
        .zip(ordering.pair_intervals())
        .enumerate()
    {
        let semitones = match direction {
            PairDirection::Ascending => interval,
            PairDirection::Either => interval.abs(),
        };
        println!(
            "Pair {}:    {}-{} {:>3} {}",
            pair + 1,
            note_name(first),
            note_name(second),
            interval,
            interval_name(semitones)
        );
    }
    match verdict {
        Verdict::Accept => println!("Verdict:   solution"),
        Verdict::Reject { pair, reason } => {
            let at = pair.map(|p| format!(" at pair {}", p + 1)).unwrap_or_default();
            println!("Verdict:   rejected ({reason:?}{at})");
        }
    }
    Ok(())
}
