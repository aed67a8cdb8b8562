//! Text normalization: cleaning, tokenization, stop-word removal and stemming

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    non_letter_regex: Regex,
    stemmer: Stemmer,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Latin letters, accented Latin-1 letters and whitespace survive cleaning.
        let non_letter_regex = Regex::new(r"[^a-zA-ZÀ-ÿ\s]")
            .expect("Invalid non-letter regex");

        Self {
            stop_words: FRENCH_STOP_WORDS.iter().map(|&s| s.to_string()).collect(),
            non_letter_regex,
            stemmer: Stemmer::create(Algorithm::French),
        }
    }

    /// Normalize text into a space-joined sequence of stems.
    pub fn preprocess(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        self.tokenize(text)
            .iter()
            .map(|t| self.stem(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase, strip non-letters, split into words and drop stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text);

        cleaned
            .unicode_words()
            .filter(|word| word.chars().count() > 2 && !self.stop_words.contains(*word))
            .map(|word| word.to_string())
            .collect()
    }

    pub fn clean_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.non_letter_regex.replace_all(&lowered, " ").into_owned()
    }

    pub fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }
}

/// Snowball French stop-word list.
const FRENCH_STOP_WORDS: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et",
    "eux", "il", "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me",
    "même", "mes", "moi", "mon", "ne", "nos", "notre", "nous", "on", "ou", "par",
    "pas", "pour", "qu", "que", "qui", "sa", "se", "ses", "son", "sur", "ta", "te",
    "tes", "toi", "ton", "tu", "un", "une", "vos", "votre", "vous", "c", "d", "j",
    "l", "à", "m", "n", "s", "t", "y", "été", "étée", "étées", "étés", "étant",
    "étante", "étants", "étantes", "suis", "es", "est", "sommes", "êtes", "sont",
    "serai", "seras", "sera", "serons", "serez", "seront", "serais", "serait",
    "serions", "seriez", "seraient", "étais", "était", "étions", "étiez", "étaient",
    "fus", "fut", "fûmes", "fûtes", "furent", "sois", "soit", "soyons", "soyez",
    "soient", "fusse", "fusses", "fût", "fussions", "fussiez", "fussent", "ayant",
    "ayante", "ayantes", "ayants", "eu", "eue", "eues", "eus", "ai", "as", "avons",
    "avez", "ont", "aurai", "auras", "aura", "aurons", "aurez", "auront", "aurais",
    "aurait", "aurions", "auriez", "auraient", "avais", "avait", "avions", "aviez",
    "avaient", "eut", "eûmes", "eûtes", "eurent", "aie", "aies", "ait", "ayons",
    "ayez", "aient", "eusse", "eusses", "eût", "eussions", "eussiez", "eussent",
];
