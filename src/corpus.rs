use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

use crate::token::WordToken;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A fixed word list embedded in the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Corpus {
    pub fn new(name: &str) -> Self {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .expect("corpus file not found");
        let contents = file
            .contents_utf8()
            .expect("unable to interpret corpus file as a string");
        from_str(contents).expect("unable to deserialize corpus json")
    }

    /// Draw `count` words uniformly at random, with replacement.
    pub fn draw(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| self.words[rng.gen_range(0..self.words.len())].clone())
            .collect()
    }

    /// One fresh word token drawn at random.
    pub fn token(&self) -> WordToken {
        let mut rng = rand::thread_rng();
        WordToken::new(self.words[rng.gen_range(0..self.words.len())].clone())
    }

    /// `count` fresh word tokens drawn at random.
    pub fn tokens(&self, count: usize) -> Vec<WordToken> {
        self.draw(count).into_iter().map(WordToken::new).collect()
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Quote {
    pub text: String,
    pub source: String,
}

#[derive(Deserialize)]
struct QuoteFile {
    quotes: Vec<Quote>,
}

/// Pick one of the embedded quotes uniformly at random.
pub fn random_quote() -> Quote {
    let file = WORDS_DIR
        .get_file("quotes.json")
        .expect("quotes file not found");
    let contents = file
        .contents_utf8()
        .expect("unable to interpret quotes file as a string");
    let parsed: QuoteFile = from_str(contents).expect("unable to deserialize quotes json");
    let mut rng = rand::thread_rng();
    parsed.quotes[rng.gen_range(0..parsed.quotes.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_corpus_loads() {
        let corpus = Corpus::new("english");
        assert_eq!(corpus.name, "english");
        assert!(!corpus.words.is_empty());
        assert_eq!(corpus.size as usize, corpus.words.len());
    }

    #[test]
    fn draw_returns_requested_count_from_corpus() {
        let corpus = Corpus::new("english");
        let words = corpus.draw(25);
        assert_eq!(words.len(), 25);
        for w in &words {
            assert!(corpus.words.contains(w));
        }
    }

    #[test]
    fn draw_zero_is_empty() {
        let corpus = Corpus::new("english");
        assert!(corpus.draw(0).is_empty());
    }

    #[test]
    fn tokens_start_untouched() {
        let corpus = Corpus::new("english");
        for t in corpus.tokens(10) {
            assert!(t.typed.is_empty());
            assert_eq!(t.letters.len(), t.target_len());
        }
    }

    #[test]
    fn random_quote_comes_from_embedded_set() {
        let q = random_quote();
        assert!(!q.text.is_empty());
        assert!(!q.source.is_empty());
        // quotes are plain lowercase words, suitable for word tokens
        assert!(q.text.split_whitespace().count() > 1);
    }

    #[test]
    #[should_panic(expected = "corpus file not found")]
    fn unknown_corpus_panics() {
        let _ = Corpus::new("klingon");
    }
}
