/// Per-letter comparison state for one position in a target word.
///
/// Positions inside the target are Pending until visited, then Correct or
/// Wrong. Positions past the end of the target only ever hold Extra, and
/// only as a trailing run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterState {
    Pending,
    Correct,
    Wrong,
    Extra,
}

/// One target word plus everything typed against it. The cursor owns the
/// position; the token just records what happened at each slot.
#[derive(Clone, Debug, PartialEq)]
pub struct WordToken {
    pub target: String,
    pub letters: Vec<LetterState>,
    pub typed: String,
}

impl WordToken {
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        let letters = vec![LetterState::Pending; target.chars().count()];
        Self {
            target,
            letters,
            typed: String::new(),
        }
    }

    pub fn target_len(&self) -> usize {
        self.target.chars().count()
    }

    pub fn typed_len(&self) -> usize {
        self.typed.chars().count()
    }

    /// Record one typed character at slot `idx` and return the state it
    /// produced. Inside the target the slot is marked Correct or Wrong;
    /// past the end a trailing Extra entry is appended instead of the
    /// character being rejected. The keystroke always lands in `typed`.
    pub fn type_char_at(&mut self, idx: usize, ch: char) -> LetterState {
        let state = if idx < self.target_len() {
            let expected = self.target.chars().nth(idx).unwrap();
            if ch == expected {
                LetterState::Correct
            } else {
                LetterState::Wrong
            }
        } else {
            LetterState::Extra
        };

        if idx < self.target_len() {
            self.letters[idx] = state;
        } else {
            self.letters.push(LetterState::Extra);
        }
        self.typed.push(ch);
        state
    }

    /// Undo the keystroke that freed slot `idx`: drop the last typed
    /// character, and either revert the slot to Pending or, when it lies
    /// beyond the target, remove the trailing Extra entry outright.
    /// Returns false when nothing has been typed.
    pub fn erase_at(&mut self, idx: usize) -> bool {
        if self.typed.pop().is_none() {
            return false;
        }
        if idx >= self.target_len() {
            self.letters.pop();
        } else {
            self.letters[idx] = LetterState::Pending;
        }
        true
    }

    /// Extra characters typed past the end of the target, in order.
    pub fn extra_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.typed.chars().skip(self.target_len())
    }
}

/// Active position in the word sequence. `word` is a virtual index that
/// stays meaningful across buffer trimming; `letter` tracks the position
/// within the word under the cursor and can exceed the target length once
/// extras are typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub word: usize,
    pub letter: usize,
}
