//! Hex payload navigation and unique find-pattern growth.
//!
//! A binary rename patch must match exactly once in the compiled table. Given a
//! needle that sits in a known hex run of the listing, the pad finder borrows
//! neighbouring bytes from the listing, one byte at a time, until
//! `left + needle + right` occurs once in the raw image.

use crate::dsl::lines::{hex_text, is_hex};
use crate::error::PadError;

/// A contiguous run of hex payload lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRun {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Which side of the needle may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadDirection {
    /// Only append bytes after the needle.
    Forward,
    /// Only prepend bytes before the needle.
    Backward,
    /// Grow the shorter side, preferring the right on ties.
    Either,
}

/// Bytes (as hex) surrounding a needle that make it unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquePad {
    pub left: String,
    pub right: String,
}

impl UniquePad {
    /// Combined pad length in hex digits.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `left + needle + right`.
    pub fn wrap(&self, needle: &str) -> String {
        format!("{}{}{}", self.left, needle, self.right)
    }
}

/// Count occurrences of `needle` in `haystack`, stopping once `limit` is reached.
pub fn count_occurrences(haystack: &[u8], needle: &[u8], limit: usize) -> usize {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }
    haystack.windows(needle.len()).filter(|w| *w == needle).take(limit).count()
}

/// Byte-aligned, non-overlapping offsets of `needle` inside a hex string.
fn aligned_matches(text: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut idx = 0;
    while idx + needle.len() <= text.len() {
        if text[idx..idx + needle.len()].eq_ignore_ascii_case(needle) {
            found.push(idx);
            idx += needle.len();
        } else {
            idx += 2;
        }
    }
    found
}

/// Read-only view over the listing lines and the raw table.
#[derive(Debug, Clone, Copy)]
pub struct HexLocator<'a> {
    lines: &'a [String],
    raw: &'a [u8],
}

impl<'a> HexLocator<'a> {
    pub fn new(lines: &'a [String], raw: &'a [u8]) -> Self {
        Self { lines, raw }
    }

    /// Concatenate hex from `start` forward until a non-hex line.
    ///
    /// Returns the text and the last hex line index, or `None` when `start`
    /// isn't a hex line.
    pub fn hex_starting_at(&self, start: usize) -> (String, Option<usize>) {
        let mut text = String::new();
        let mut last = None;
        for (idx, line) in self.lines.iter().enumerate().skip(start) {
            if !is_hex(line) {
                break;
            }
            text.push_str(&hex_text(line));
            last = Some(idx);
        }
        (text, last)
    }

    /// Concatenate hex from `end` backward until a non-hex line.
    ///
    /// Returns the text and the first hex line index of the run.
    pub fn hex_ending_at(&self, end: usize) -> (String, Option<usize>) {
        let mut text = String::new();
        let mut first = None;
        if end >= self.lines.len() {
            return (text, first);
        }
        for idx in (0..=end).rev() {
            let line = &self.lines[idx];
            if !is_hex(line) {
                break;
            }
            text.insert_str(0, &hex_text(line));
            first = Some(idx);
        }
        (text, first)
    }

    /// Next hex run strictly after the run (if any) containing `index`.
    pub fn find_next_hex(&self, index: usize) -> Option<HexRun> {
        let mut in_current = true;
        for (idx, line) in self.lines.iter().enumerate().skip(index) {
            if in_current {
                if !is_hex(line) {
                    in_current = false;
                }
                continue;
            }
            if is_hex(line) {
                let (text, end) = self.hex_starting_at(idx);
                return Some(HexRun { text, start: idx, end: end.unwrap_or(idx) });
            }
        }
        None
    }

    /// Previous hex run strictly before the run (if any) containing `index`.
    pub fn find_previous_hex(&self, index: usize) -> Option<HexRun> {
        if self.lines.is_empty() {
            return None;
        }
        let index = index.min(self.lines.len() - 1);
        let mut in_current = true;
        for idx in (0..=index).rev() {
            let line = &self.lines[idx];
            if in_current {
                if !is_hex(line) {
                    in_current = false;
                }
                continue;
            }
            if is_hex(line) {
                let (text, start) = self.hex_ending_at(idx);
                return Some(HexRun { text, start: start.unwrap_or(idx), end: idx });
            }
        }
        None
    }

    /// Grow a pad around occurrence `instance` of `needle` in the run at `at`
    /// until the padded pattern occurs exactly once in the raw table.
    pub fn unique_pad(
        &self,
        needle: &str,
        at: usize,
        direction: PadDirection,
        instance: usize,
    ) -> Result<UniquePad, PadError> {
        let needle = needle.to_ascii_uppercase();
        if needle.is_empty() || needle.len() % 2 != 0 || hex::decode(&needle).is_err() {
            return Err(PadError::InvalidNeedle(needle));
        }

        let (run, last) = self.hex_starting_at(at);
        let positions = aligned_matches(&run, &needle);
        if positions.is_empty() {
            return Err(PadError::NeedleNotFound {
                needle,
                start: at,
                end: last.unwrap_or(at),
            });
        }
        let Some(&pos) = positions.get(instance) else {
            return Err(PadError::InstanceOutOfRange { instance, found: positions.len() });
        };

        let mut left_pool = run[..pos].to_string();
        let mut right_pool = run[pos + needle.len()..].to_string();
        let mut first_line = at;
        // `at` may sit mid-run; the run's earlier lines come first on the left.
        if let Some(above) = at.checked_sub(1) {
            if let (text, Some(start)) = self.hex_ending_at(above) {
                left_pool.insert_str(0, &text);
                first_line = start;
            }
        }
        let mut last_line = last.unwrap_or(at);
        let mut pad = UniquePad::default();

        loop {
            let candidate = hex::decode(pad.wrap(&needle))?;
            if count_occurrences(self.raw, &candidate, 2) == 1 {
                tracing::debug!(
                    needle = %needle,
                    left = %pad.left,
                    right = %pad.right,
                    "unique pad found"
                );
                return Ok(pad);
            }

            let grow_right = match direction {
                PadDirection::Forward => true,
                PadDirection::Backward => false,
                PadDirection::Either => pad.right.len() <= pad.left.len(),
            };

            if grow_right {
                while right_pool.len() < 2 {
                    let next = self
                        .find_next_hex(last_line)
                        .ok_or_else(|| PadError::Exhausted { needle: needle.clone() })?;
                    right_pool.push_str(&next.text);
                    last_line = next.end;
                }
                pad.right.push_str(&right_pool[..2]);
                right_pool.replace_range(..2, "");
            } else {
                while left_pool.len() < 2 {
                    let previous = self
                        .find_previous_hex(first_line)
                        .ok_or_else(|| PadError::Exhausted { needle: needle.clone() })?;
                    left_pool.insert_str(0, &previous.text);
                    first_line = previous.start;
                }
                let split = left_pool.len() - 2;
                pad.left.insert_str(0, &left_pool[split..]);
                left_pool.truncate(split);
            }
        }
    }

    /// Try backward-only, forward-only and free growth; keep the shortest pad.
    ///
    /// Ties keep the earlier mode in that order. Fails only when all three do.
    pub fn shortest_unique_pad(
        &self,
        needle: &str,
        at: usize,
        instance: usize,
    ) -> Result<UniquePad, PadError> {
        let mut best: Option<UniquePad> = None;
        let mut last_err = None;
        for direction in [PadDirection::Backward, PadDirection::Forward, PadDirection::Either] {
            match self.unique_pad(needle, at, direction, instance) {
                Ok(pad) => {
                    if best.as_ref().map_or(true, |b| pad.len() < b.len()) {
                        best = Some(pad);
                    }
                }
                Err(err) => {
                    tracing::debug!(?direction, error = %err, "pad search failed");
                    last_err = Some(err);
                }
            }
        }
        match (best, last_err) {
            (Some(pad), _) => Ok(pad),
            (None, Some(err)) => Err(err),
            (None, None) => Err(PadError::Exhausted { needle: needle.to_string() }),
        }
    }
}
