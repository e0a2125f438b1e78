//! String operations for sequence data
//!
//! Exact-match primitives used by the motif counters and the repeat scorer.
//! All functions work on raw bytes and are case-sensitive.

use super::{ComputeError, ComputeResult};

/// Find every start position of `pattern` in `text` with the Knuth-Morris-Pratt algorithm
///
/// Overlapping occurrences are all reported, in increasing order.
pub fn kmp_search(text: &[u8], pattern: &[u8]) -> ComputeResult<Vec<usize>> {
    if pattern.is_empty() {
        return Err(ComputeError::InvalidArgument("Pattern cannot be empty".to_string()));
    }

    if text.len() < pattern.len() {
        return Ok(Vec::new());
    }

    let failure_table = compute_kmp_failure_table(pattern);

    let mut matches = Vec::new();
    let mut j = 0; // position in pattern

    for (i, &c) in text.iter().enumerate() {
        while j > 0 && pattern[j] != c {
            j = failure_table[j - 1];
        }

        if pattern[j] == c {
            j += 1;
        }

        if j == pattern.len() {
            matches.push(i + 1 - j);
            j = failure_table[j - 1];
        }
    }

    Ok(matches)
}

/// Compute the failure function table for KMP algorithm
fn compute_kmp_failure_table(pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    let mut failure = vec![0; m];
    let mut j = 0;

    for i in 1..m {
        while j > 0 && pattern[j] != pattern[i] {
            j = failure[j - 1];
        }

        if pattern[j] == pattern[i] {
            j += 1;
        }

        failure[i] = j;
    }

    failure
}

/// Count overlapping occurrences of `pattern` in `text` (sliding window, step 1)
pub fn count_occurrences(text: &[u8], pattern: &[u8]) -> ComputeResult<usize> {
    Ok(kmp_search(text, pattern)?.len())
}

/// Longest chain of back-to-back occurrences of `pattern` in `text`
///
/// A match at `i` extends the current run only when the previous match
/// started exactly at `i - pattern.len()`; any other match restarts the run
/// at 1. Overlapping matches therefore never extend a run, e.g. `AA` in
/// `AAAA` scores 1 because the match at 1 is the latest match before 2.
pub fn longest_tiling_run(text: &[u8], pattern: &[u8]) -> ComputeResult<usize> {
    let step = pattern.len();
    let mut best = 0;
    let mut run = 0;
    let mut prev_start: Option<usize> = None;

    for start in kmp_search(text, pattern)? {
        run = match prev_start {
            Some(prev) if prev + step == start => run + 1,
            _ => 1,
        };
        prev_start = Some(start);
        best = best.max(run);
    }

    Ok(best)
}

/// Iterator over the rank of every fully valid window of width `width`
///
/// `rank_of` maps a byte to its digit in base `base`, or `None` when the byte
/// is outside the alphabet. Windows containing such a byte are skipped. A
/// window's rank is its base-`base` value with the first byte most significant.
pub struct WindowRanks<'a, F> {
    text: &'a [u8],
    pos: usize,
    width: usize,
    base: usize,
    /// `base^(width - 1)`, the place value of a window's first digit
    lead: usize,
    value: usize,
    valid: usize,
    rank_of: F,
}

impl<'a, F> Iterator for WindowRanks<'a, F>
where
    F: Fn(u8) -> Option<usize>,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.text.len() {
            let byte = self.text[self.pos];
            self.pos += 1;

            match (self.rank_of)(byte) {
                Some(digit) => {
                    self.value = (self.value % self.lead) * self.base + digit;
                    self.valid += 1;
                    if self.valid >= self.width {
                        return Some(self.value);
                    }
                }
                None => {
                    self.value = 0;
                    self.valid = 0;
                }
            }
        }
        None
    }
}

/// Create a [`WindowRanks`] iterator over `text`
///
/// Fails with `InvalidArgument` when `width` or `base` is zero or when
/// `base^width` does not fit in a `usize`.
pub fn window_ranks<F>(text: &[u8], width: usize, base: usize, rank_of: F) -> ComputeResult<WindowRanks<'_, F>>
where
    F: Fn(u8) -> Option<usize>,
{
    if width == 0 || base == 0 {
        return Err(ComputeError::InvalidArgument(
            "Window width and base must be positive".to_string(),
        ));
    }
    checked_space(base, width)?;
    let lead = checked_space(base, width - 1)?;

    Ok(WindowRanks {
        text,
        pos: 0,
        width,
        base,
        lead,
        value: 0,
        valid: 0,
        rank_of,
    })
}

/// `base^width`, or `InvalidArgument` on overflow
pub fn checked_space(base: usize, width: usize) -> ComputeResult<usize> {
    let exp = u32::try_from(width).map_err(|_| {
        ComputeError::InvalidArgument(format!("Width {} is too large", width))
    })?;
    base.checked_pow(exp).ok_or_else(|| {
        ComputeError::InvalidArgument(format!(
            "Candidate space {}^{} does not fit in memory indices",
            base, width
        ))
    })
}
