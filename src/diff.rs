/// Judgement of a single character slot in a target word.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Classification {
    Correct,
    Incorrect,
    /// Not typed yet.
    Pending,
}

/// Result of comparing a typed fragment with its target word.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WordDiff {
    pub classifications: Vec<Classification>,
    /// Number of `Correct` slots.
    pub correct: usize,
    /// Char indices of the `Incorrect` slots, ascending.
    pub errors: Vec<usize>,
}

impl WordDiff {
    /// Number of characters actually typed, i.e. slots that are not pending.
    pub fn typed_len(&self) -> usize {
        self.correct + self.errors.len()
    }
}

/// Compares `typed` against `target` character by character.
///
/// Every slot up to the longer of the two strings gets a classification:
/// slots past the end of `typed` are pending, matching chars are correct and
/// everything else (substitutions and characters beyond the target) is
/// incorrect. Only the current fragment is considered, so calling this again
/// after a deletion simply yields the shorter picture.
pub fn diff(target: &str, typed: &str) -> WordDiff {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    let len = target.len().max(typed.len());

    let mut result = WordDiff {
        classifications: Vec::with_capacity(len),
        ..WordDiff::default()
    };

    for i in 0..len {
        let classification = match (typed.get(i), target.get(i)) {
            (None, _) => Classification::Pending,
            (Some(t), Some(e)) if t == e => {
                result.correct += 1;
                Classification::Correct
            }
            _ => {
                result.errors.push(i);
                Classification::Incorrect
            }
        };
        result.classifications.push(classification);
    }

    result
}
