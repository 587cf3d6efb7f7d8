//! Deliberate typos that make prompt variants look hand-typed.
//!
//! Only interior words are touched when there are more than two words, and
//! only words longer than three characters change. Every index range below
//! is inclusive on both ends.

use rand::Rng;
use rand::seq::IndexedRandom;

const MIN_TEXT_CHARS: usize = 10;
const MIN_TYPOS: usize = 2;
const MAX_TYPOS: usize = 5;
const MIN_WORD_CHARS: usize = 4;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Typo {
    Insertion,
    Swap,
    Substitution,
    Duplication,
}

const TYPOS: [Typo; 4] = [Typo::Insertion, Typo::Swap, Typo::Substitution, Typo::Duplication];

/// Inject between two and five typos into `text`.
///
/// Texts shorter than ten characters or with fewer than two words come
/// back unchanged. The word count never changes; words are rejoined with
/// single spaces.
pub fn inject_typos<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 || text.chars().count() < MIN_TEXT_CHARS {
        return text.to_string();
    }

    let max_typos = (words.len() / 3).max(MIN_TYPOS).min(MAX_TYPOS);
    let num_typos = rng.random_range(MIN_TYPOS..=max_typos);

    let modifiable: Vec<usize> = if words.len() > 2 {
        (1..words.len() - 1).collect()
    } else {
        (0..words.len()).collect()
    };
    let amount = num_typos.min(modifiable.len());
    let chosen: Vec<usize> = modifiable.choose_multiple(rng, amount).copied().collect();

    let mut out: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    for position in chosen {
        out[position] = mistype(rng, words[position]);
    }
    out.join(" ")
}

fn mistype<R: Rng + ?Sized>(rng: &mut R, word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    if len < MIN_WORD_CHARS {
        return word.to_string();
    }

    match TYPOS[rng.random_range(0..TYPOS.len())] {
        Typo::Insertion => {
            let i = rng.random_range(1..=len - 1);
            chars.insert(i, random_char(rng));
        }
        Typo::Swap => {
            let i = rng.random_range(1..=len - 3);
            chars.swap(i, i + 1);
        }
        Typo::Substitution => {
            let i = rng.random_range(1..=len - 2);
            chars[i] = random_char(rng);
        }
        Typo::Duplication => {
            let i = rng.random_range(1..=len - 2);
            chars.insert(i, chars[i]);
        }
    }

    chars.into_iter().collect()
}

/// A lowercase letter or a digit, the class itself picked at random.
fn random_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    let class = if rng.random_bool(0.5) { LETTERS } else { DIGITS };
    class.choose(rng).map_or('x', |&b| char::from(b))
}
