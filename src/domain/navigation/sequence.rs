// SPDX-License-Identifier: MPL-2.0
//! Detection of a fixed input sequence within a stream of presses.

/// Gamepad button sequence (standard mapping) that unlocks the hidden
/// theme: up, up, down, down, left, right, left, right, B, A, Start.
pub const KONAMI_GAMEPAD: [u8; 11] = [12, 12, 13, 13, 14, 15, 14, 15, 1, 0, 9];

/// Tracks progress through a target sequence.
///
/// On a mismatch progress resets, but the offending press still counts
/// as a fresh start when it equals the first element.
#[derive(Debug, Clone)]
pub struct SequenceDetector<T> {
    target: Vec<T>,
    progress: usize,
}

impl<T: PartialEq> SequenceDetector<T> {
    #[must_use]
    pub fn new(target: impl Into<Vec<T>>) -> Self {
        Self {
            target: target.into(),
            progress: 0,
        }
    }

    /// Feeds one press. Returns `true` exactly when the sequence completes;
    /// progress then resets.
    pub fn push(&mut self, item: &T) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.target.get(self.progress) == Some(item) {
            self.progress += 1;
        } else if self.target.first() == Some(item) {
            self.progress = 1;
        } else {
            self.progress = 0;
        }

        if self.progress == self.target.len() {
            self.progress = 0;
            true
        } else {
            false
        }
    }

    /// Number of elements matched so far.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut SequenceDetector<u8>, presses: &[u8]) -> usize {
        presses.iter().filter(|p| detector.push(p)).count()
    }

    #[test]
    fn full_sequence_completes_once() {
        let mut detector = SequenceDetector::new(KONAMI_GAMEPAD);
        assert_eq!(feed(&mut detector, &KONAMI_GAMEPAD), 1);
        assert_eq!(detector.progress(), 0);
    }

    #[test]
    fn mismatch_resets_progress() {
        let mut detector = SequenceDetector::new(KONAMI_GAMEPAD);
        feed(&mut detector, &[12, 12, 13]);
        assert_eq!(detector.progress(), 3);
        detector.push(&0);
        assert_eq!(detector.progress(), 0);
    }

    #[test]
    fn mismatching_first_element_restarts_at_one() {
        let mut detector = SequenceDetector::new(KONAMI_GAMEPAD);
        // A third "up" breaks the run but starts a new one.
        feed(&mut detector, &[12, 12, 12]);
        assert_eq!(detector.progress(), 1);
        let rest = &KONAMI_GAMEPAD[1..];
        assert_eq!(feed(&mut detector, rest), 1);
    }

    #[test]
    fn empty_target_never_fires() {
        let mut detector: SequenceDetector<u8> = SequenceDetector::new(Vec::new());
        assert!(!detector.push(&1));
    }
}
