//! Light English stemmer.
//!
//! A conservative suffix stripper in the spirit of step 1 of the Porter
//! algorithm. It folds plural and progressive/past forms together
//! ("studies" → "study", "classes" → "class", "falling" → "fall",
//! "stressed" → "stress") and leaves everything else alone.
//!
//! Only lowercase ASCII words longer than three letters are touched; any
//! other word is returned unchanged, so non-English input is never mangled.
//!
//! # Rules
//!
//! 1. Plurals: `-sses` → `-ss`, `-ies` → `-y`, keep `-ss`/`-us`/`-is`, drop a final `-s`.
//! 2. Then, if the word ends in `-ing` or `-ed` and at least three letters
//!    containing a vowel remain, drop the suffix and undouble a final
//!    doubled consonant other than `l`, `s` or `z`.

use super::Stemmer;

const VOWELS: &[u8] = b"aeiou";

/// Light plural and verb-suffix stemmer for English.
#[derive(Debug, Clone, Default)]
pub struct LightStemmer;

impl LightStemmer {
    /// Create a new light stemmer.
    pub fn new() -> Self {
        LightStemmer
    }

    fn has_vowel(stem: &str) -> bool {
        stem.bytes().any(|b| VOWELS.contains(&b))
    }

    fn ends_with_double_consonant(stem: &str) -> bool {
        let bytes = stem.as_bytes();
        if bytes.len() < 2 {
            return false;
        }
        let last = bytes[bytes.len() - 1];
        last == bytes[bytes.len() - 2] && !VOWELS.contains(&last) && !b"lsz".contains(&last)
    }

    fn strip_plural(word: &mut String) {
        if word.ends_with("sses") {
            word.truncate(word.len() - 2);
        } else if word.ends_with("ies") {
            word.truncate(word.len() - 3);
            word.push('y');
        } else if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            // already singular
        } else if word.ends_with('s') {
            word.pop();
        }
    }

    fn strip_verb_suffix(word: &mut String) {
        for suffix in ["ing", "ed"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() >= 3 && Self::has_vowel(stem) {
                    let mut stem = stem.to_string();
                    if Self::ends_with_double_consonant(&stem) {
                        stem.pop();
                    }
                    *word = stem;
                }
                return;
            }
        }
    }
}

impl Stemmer for LightStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 3 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        let mut stemmed = word.to_string();
        Self::strip_plural(&mut stemmed);
        Self::strip_verb_suffix(&mut stemmed);
        stemmed
    }

    fn name(&self) -> &'static str {
        "light"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plurals() {
        let stemmer = LightStemmer::new();

        assert_eq!(stemmer.stem("studies"), "study");
        assert_eq!(stemmer.stem("classes"), "class");
        assert_eq!(stemmer.stem("exams"), "exam");
        assert_eq!(stemmer.stem("friends"), "friend");
        assert_eq!(stemmer.stem("stress"), "stress");
        assert_eq!(stemmer.stem("anxious"), "anxious");
        assert_eq!(stemmer.stem("this"), "this");
    }

    #[test]
    fn test_verb_suffixes() {
        let stemmer = LightStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("falling"), "fall");
        assert_eq!(stemmer.stem("stressed"), "stress");
        assert_eq!(stemmer.stem("feeling"), "feel");
        assert_eq!(stemmer.stem("isolated"), "isolat");
        // too little left to strip safely
        assert_eq!(stemmer.stem("need"), "need");
        assert_eq!(stemmer.stem("sing"), "sing");
        assert_eq!(stemmer.stem("trying"), "trying");
    }

    #[test]
    fn test_non_ascii_and_short_words_untouched() {
        let stemmer = LightStemmer::new();

        assert_eq!(stemmer.stem("fatigués"), "fatigués");
        assert_eq!(stemmer.stem("Exams"), "Exams");
        assert_eq!(stemmer.stem("cry"), "cry");
        assert_eq!(stemmer.stem(""), "");
    }
}
