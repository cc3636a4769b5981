use std::iter::FusedIterator;

const ALPHABET_LEN: usize = 26;

/// `start, start + step, ...` with exactly `count` terms.
///
/// The exclusive stop bound `start + 1 + (count - 1) * step` is what a
/// half-open range would need; tracking the remaining term count instead keeps
/// the length exact for negative and zero steps too.
#[derive(Debug, Clone)]
pub struct NumericSequence {
    next: i64,
    step: i64,
    remaining: usize,
}

impl NumericSequence {
    pub fn new(start: i64, step: i64, count: usize) -> Self {
        Self {
            next: start,
            step,
            remaining: count,
        }
    }

    pub fn stop_bound(start: i64, step: i64, count: usize) -> i64 {
        let terms = i64::try_from(count).unwrap_or(i64::MAX);
        start
            .saturating_add(1)
            .saturating_add(terms.saturating_sub(1).saturating_mul(step))
    }
}

impl Default for NumericSequence {
    fn default() -> Self {
        Self::new(0, 1, 0)
    }
}

impl Iterator for NumericSequence {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next;
        self.next = self.next.saturating_add(self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for NumericSequence {}
impl FusedIterator for NumericSequence {}

/// Single letters from `a` (or `A`), `count % 26` of them.
///
/// More than 26 files wrap the length instead of moving on to `aa`, `ab`, ...
#[derive(Debug, Clone)]
pub struct AlphabeticSequence {
    next: u8,
    end: u8,
}

impl AlphabeticSequence {
    pub fn new(count: usize, upper: bool) -> Self {
        let first = if upper { b'A' } else { b'a' };
        let len = (count % ALPHABET_LEN) as u8;
        Self {
            next: first,
            end: first + len,
        }
    }
}

impl Iterator for AlphabeticSequence {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        self.next += 1;
        Some(char::from(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::from(self.end.saturating_sub(self.next));
        (len, Some(len))
    }
}

impl ExactSizeIterator for AlphabeticSequence {}
impl FusedIterator for AlphabeticSequence {}

pub fn numeric_sequence(start: i64, step: i64, count: usize) -> NumericSequence {
    NumericSequence::new(start, step, count)
}

pub fn alphabetic_sequence(count: usize, upper: bool) -> AlphabeticSequence {
    AlphabeticSequence::new(count, upper)
}
