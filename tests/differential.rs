//! Randomized differential testing against a naive reference matcher.
//! Limited to shapes a hand-rolled reference can decide unambiguously:
//! literal alternation and negated digit classes, both without anchors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quickrex::Regex;

const WORDS: &[&str] = &["cat", "dog", "fish", "bird", "lizard", "ant", "bee"];
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789 ";

fn naive_literal_alternation_match(words: &[&str], text: &str) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn naive_negated_digit_class_match(text: &str) -> bool {
    text.bytes().any(|b| !b.is_ascii_digit())
}

fn random_text(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect()
}

#[test]
fn literal_alternation_agrees_with_naive_reference() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for trial in 0..200 {
        let word_count = rng.gen_range(2..=WORDS.len());
        let chosen = &WORDS[..word_count];
        let pattern = chosen.join("|");
        let re = Regex::new(&pattern).unwrap();

        let text = random_text(&mut rng, rng.gen_range(0..40));
        let expected = naive_literal_alternation_match(chosen, &text);
        assert_eq!(
            re.is_match(&text),
            expected,
            "trial {trial}: pattern {pattern:?} text {text:?}"
        );
    }
}

#[test]
fn negated_digit_class_agrees_with_naive_reference() {
    let mut rng = StdRng::seed_from_u64(0xFACADE);
    let re = Regex::new("[^0-9]+").unwrap();
    for trial in 0..200 {
        let len = rng.gen_range(0..30);
        let text: String = (0..len)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    (b'0' + rng.gen_range(0u8..10)) as char
                } else {
                    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
                }
            })
            .collect();
        let expected = naive_negated_digit_class_match(&text);
        assert_eq!(re.is_match(&text), expected, "trial {trial}: text {text:?}");
    }
}
