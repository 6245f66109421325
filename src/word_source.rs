use rand::Rng;

use crate::error::{ConfigIssue, SessionError};
use crate::vocabulary::Vocabulary;

/// Draws `count` words uniformly, with replacement, from `vocabulary`.
pub fn generate<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, SessionError> {
    if count == 0 {
        return Err(ConfigIssue::ZeroWordCount.into());
    }

    Ok(draw(vocabulary.words(), count, rng))
}

fn draw<R: Rng + ?Sized>(words: &[String], count: usize, rng: &mut R) -> Vec<String> {
    (0..count)
        .map(|_| words[rng.gen_range(0..words.len())].clone())
        .collect()
}

/// Produces the target words for each new session
#[derive(Debug, Clone)]
pub struct WordSource {
    vocabulary: Vocabulary,
    count: usize,
}

impl WordSource {
    pub fn new(vocabulary: Vocabulary, count: usize) -> Result<Self, SessionError> {
        if count == 0 {
            return Err(ConfigIssue::ZeroWordCount.into());
        }
        Ok(Self { vocabulary, count })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        draw(self.vocabulary.words(), self.count, rng)
    }
}
