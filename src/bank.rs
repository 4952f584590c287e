use crate::corpus::Corpus;
use crate::stats::CharTally;
use crate::token::WordToken;

/// Planning speed used to size timed-mode buffers. Generous on purpose:
/// the buffer must outlast the timer even for very fast typists.
pub const BASE_WPM: usize = 220;
pub const SAFETY_FACTOR: f64 = 1.4;

/// Extension fires once the cursor is within this many words of the tail.
pub const LOOKAHEAD_WORDS: usize = 40;
/// Number of words appended per extension.
pub const EXTEND_BATCH: usize = 80;
/// Typed words kept behind the cursor when the head is trimmed. Backspace
/// walks back one word per press, so this is the reachable history.
pub const RETAINED_WORDS: usize = 80;

/// Character budget for a timed run: enough target text, spaces included,
/// to keep a `BASE_WPM` typist busy for the whole duration.
pub fn char_budget(duration_secs: u64) -> usize {
    (BASE_WPM as f64 * 5.0 * (duration_secs as f64 / 60.0) * SAFETY_FACTOR).ceil() as usize
}

/// The target word sequence, stored as a growable arena plus a monotonic
/// virtual offset. Callers address words by virtual index; trimming the
/// head bumps the offset so those indices keep working while physical
/// storage stays bounded.
#[derive(Debug)]
pub struct WordBank {
    words: Vec<WordToken>,
    offset: usize,
    retired: CharTally,
}

impl WordBank {
    /// A fixed, non-extending sequence (words and quote modes).
    pub fn fixed(words: Vec<WordToken>) -> Self {
        Self {
            words,
            offset: 0,
            retired: CharTally::default(),
        }
    }

    /// Fill with random words until the cumulative `(len + 1)` character
    /// count reaches the budget for `duration_secs` (time mode).
    pub fn budgeted(corpus: &Corpus, duration_secs: u64) -> Self {
        let budget = char_budget(duration_secs);
        let mut words = Vec::new();
        let mut chars = 0;
        while chars < budget {
            let token = corpus.token();
            chars += token.target_len() + 1;
            words.push(token);
        }
        Self::fixed(words)
    }

    /// An open-ended sequence seeded with `initial` words (zen mode);
    /// relies on extension to stay ahead of the cursor.
    pub fn open(corpus: &Corpus, initial: usize) -> Self {
        Self::fixed(corpus.tokens(initial))
    }

    /// Virtual index of the oldest word still in storage.
    pub fn first_index(&self) -> usize {
        self.offset
    }

    /// One past the last virtual index.
    pub fn virtual_len(&self) -> usize {
        self.offset + self.words.len()
    }

    pub fn physical_len(&self) -> usize {
        self.words.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.virtual_len()
    }

    pub fn word(&self, index: usize) -> Option<&WordToken> {
        index
            .checked_sub(self.offset)
            .and_then(|i| self.words.get(i))
    }

    pub fn word_mut(&mut self, index: usize) -> Option<&mut WordToken> {
        index
            .checked_sub(self.offset)
            .and_then(|i| self.words.get_mut(i))
    }

    /// Iterate the retained window with virtual indices.
    pub fn words(&self) -> impl Iterator<Item = (usize, &WordToken)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (i + self.offset, w))
    }

    /// Tally of words trimmed away; folded into real statistics so the
    /// window never under-reports a long run.
    pub fn retired(&self) -> &CharTally {
        &self.retired
    }

    /// Append a batch once the cursor is within `LOOKAHEAD_WORDS` of the
    /// tail, then trim the head down to `RETAINED_WORDS` behind the
    /// cursor. Returns whether an extension happened.
    pub fn extend_if_needed(&mut self, cursor_word: usize, corpus: &Corpus) -> bool {
        if self.virtual_len().saturating_sub(cursor_word) > LOOKAHEAD_WORDS {
            return false;
        }
        self.words.extend(corpus.tokens(EXTEND_BATCH));

        let trimmable = cursor_word
            .saturating_sub(RETAINED_WORDS)
            .saturating_sub(self.offset);
        let n = trimmable.min(EXTEND_BATCH).min(self.words.len());
        if n > 0 {
            for word in self.words.drain(..n) {
                self.retired.add_word(&word);
                // every trimmed word sits behind the cursor, so unreached
                // target positions count as missed
                self.retired.missed += word.target_len().saturating_sub(word.typed_len());
            }
            self.offset += n;
        }
        true
    }
}
