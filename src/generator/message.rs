//! Lorem-ipsum style filler text.

use rand::seq::SliceRandom;
use rand::Rng;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla",
    "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt",
    "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum", "porro",
    "quisquam", "dolorem", "numquam", "eius", "modi", "tempora", "incidunt", "magnam",
    "quaerat", "voluptatem", "neque", "etincidunt", "adipisci", "quiquia",
];

fn word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("lorem")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One sentence of 4 to 12 words, capitalized and ending in '.'.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(4..=12);
    let words: Vec<&str> = (0..count).map(|_| word(rng)).collect();
    format!("{}.", capitalize(&words.join(" ")))
}

/// A paragraph of 3 to 8 sentences.
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(3..=8);
    (0..count)
        .map(|_| sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exactly `count` words, first letter capitalized, ending in '.'.
pub fn by_words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    let words: Vec<&str> = (0..count).map(|_| word(rng)).collect();
    format!("{}.", capitalize(&words.join(" ")))
}

/// Text of at most `length` characters, ending in '.'.
///
/// The text is cut at a word boundary when that keeps more than 80% of
/// the requested length.
pub fn by_length<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    if length == 0 {
        return String::new();
    }

    let mut text = paragraph(rng);
    while text.len() < length {
        text.push(' ');
        text.push_str(&paragraph(rng));
    }

    // The word list is ASCII, so byte and char offsets agree.
    let mut cut = &text[..length];
    if text.len() > length {
        if let Some(space) = cut.rfind(' ') {
            if space * 5 > length * 4 {
                cut = &cut[..space];
            }
        }
    }

    let mut message = capitalize(cut.trim());
    if !message.is_empty() && !message.ends_with('.') {
        if message.len() >= length {
            message.pop();
            let kept = message.trim_end().len();
            message.truncate(kept);
        }
        message.push('.');
    }
    message
}
