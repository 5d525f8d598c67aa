use std::io::Write;
use std::time::{Duration, Instant};

use ivf_scan::{Progress, ProgressSink, StopSignal};

/// Renders `value` with comma thousands separators.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Progress line on stderr, redrawn at most once per `interval`.
pub struct ConsoleProgress {
    interval: Duration,
    last_draw: Option<Instant>,
    last: Option<Progress>,
}

impl ConsoleProgress {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_draw: None,
            last: None,
        }
    }

    fn draw(&self, progress: &Progress) {
        let mut stderr = std::io::stderr();
        let _ = write!(
            stderr,
            "\rFinding solutions: {}/{} ({} solutions) {:5.1}%",
            group_digits(progress.current_index),
            group_digits(progress.total),
            group_digits(progress.solutions as u64),
            progress.fraction() * 100.0,
        );
        let _ = stderr.flush();
    }

    /// Draws the last snapshot unthrottled and ends the line.
    pub fn finish(&mut self) {
        if let Some(progress) = self.last {
            self.draw(&progress);
            eprintln!();
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, progress: Progress) {
        self.last = Some(progress);
        let due = self
            .last_draw
            .map_or(true, |drawn| drawn.elapsed() >= self.interval);
        if due {
            self.draw(&progress);
            self.last_draw = Some(Instant::now());
        }
    }
}

/// Stops the scan once a wall-clock deadline passes.
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline when `limit` is `None`.
    pub fn after(limit: Option<Duration>) -> Self {
        Self {
            at: limit.map(|limit| Instant::now() + limit),
        }
    }
}

impl StopSignal for Deadline {
    fn should_stop(&self, _next_index: u64) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Prints `Saving: written/total` lines, throttled like [`ConsoleProgress`].
pub fn saving_reporter(interval: Duration) -> impl FnMut(usize, usize) {
    let mut last_draw: Option<Instant> = None;
    move |written, total| {
        let due = written == total || last_draw.map_or(true, |drawn| drawn.elapsed() >= interval);
        if due {
            eprint!(
                "\rSaving: {}/{}",
                group_digits(written as u64),
                group_digits(total as u64)
            );
            last_draw = Some(Instant::now());
            if written == total {
                eprintln!();
            }
        }
    }
}
