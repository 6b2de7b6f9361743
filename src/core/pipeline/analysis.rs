//! Lightweight article analysis: leading-sentence summary, TF-IDF keywords and key phrases.
//!
//! Sentences are the fragments between runs of `.`, `!` and `?`. Terms are ASCII-alphabetic
//! words of the lower-cased text.

use crate::core::config::AnalysisConfig;
use indexmap::IndexMap;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const MIN_KEYWORD_TEXT_LENGTH: usize = 50;
const MIN_PHRASE_TEXT_LENGTH: usize = 100;
const MIN_PHRASE_SENTENCE_LENGTH: usize = 20;
const PHRASE_KEYWORD_POOL: usize = 20;
const POSITION_WINDOW: usize = 100;
const SMALL_TEXT_TERMS: usize = 10;

/// Derived text features attached to the canonical payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextAnalysis {
    pub summary: String,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
}

/// Run all analyses with the configured limits.
pub fn analyze(text: &str, limits: &AnalysisConfig) -> TextAnalysis {
    TextAnalysis {
        summary: summarize(text, limits.summary_sentences),
        keywords: extract_keywords(text, limits.max_keywords),
        phrases: extract_key_phrases(text, limits.max_phrases),
    }
}

fn sentence_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"))
}

fn word_pattern() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is valid"))
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    sentence_splitter().split(text)
}

fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Join the first `max_sentences` sentences; `...` marks truncation.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let fragments: Vec<&str> = sentences(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if fragments.len() <= max_sentences {
        return fragments.join(". ");
    }
    format!("{}...", fragments[..max_sentences].join(". "))
}

/// Lower-cased alphabetic terms of 3..=20 characters that are not stop words.
pub fn significant_terms(text: &str) -> Vec<String> {
    let stop = stop_words();
    words(text)
        .into_iter()
        .filter(|word| (3..=20).contains(&word.len()) && !stop.contains(word.as_str()))
        .collect()
}

/// Rank terms by sentence-level TF-IDF with length and position boosts.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    if text.trim().chars().count() < MIN_KEYWORD_TEXT_LENGTH {
        return Vec::new();
    }

    let terms = significant_terms(text);
    if terms.len() < SMALL_TEXT_TERMS {
        let mut seen = HashSet::new();
        return terms
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .take(max_keywords)
            .collect();
    }

    let mut frequency: IndexMap<&str, usize> = IndexMap::new();
    for term in &terms {
        *frequency.entry(term.as_str()).or_insert(0) += 1;
    }
    let total = terms.len() as f64;

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    let mut sentence_count = 0usize;
    for sentence in sentences(text) {
        if !sentence.trim().is_empty() {
            sentence_count += 1;
        }
        let distinct: HashSet<String> = significant_terms(sentence).into_iter().collect();
        for term in distinct {
            if let Some((key, _)) = frequency.get_key_value(term.as_str()) {
                *document_frequency.entry(*key).or_insert(0) += 1;
            }
        }
    }

    let leading: HashSet<&str> = terms
        .iter()
        .take(POSITION_WINDOW)
        .map(String::as_str)
        .collect();

    let mut scored: Vec<(&str, f64)> = frequency
        .iter()
        .filter(|(term, count)| **count >= 2 || term.len() > 6)
        .map(|(term, count)| {
            let tf = *count as f64 / total;
            let tf_idf = match document_frequency.get(term) {
                Some(df) if *df > 0 => tf * (sentence_count as f64 / *df as f64).ln(),
                _ => tf,
            };
            let length_boost = if term.len() > 4 {
                (term.len() as f64 / 6.0).min(2.0)
            } else {
                1.0
            };
            let position_boost = if leading.contains(term) { 1.2 } else { 1.0 };
            (*term, tf_idf * length_boost * position_boost)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(max_keywords)
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Two to four word windows that carry keywords and are not framed by stop words.
pub fn extract_key_phrases(text: &str, max_phrases: usize) -> Vec<String> {
    if text.trim().chars().count() < MIN_PHRASE_TEXT_LENGTH {
        return Vec::new();
    }

    let stop = stop_words();
    let keywords: HashSet<String> = extract_keywords(text, PHRASE_KEYWORD_POOL)
        .into_iter()
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked: Vec<(String, f64)> = Vec::new();
    for sentence in sentences(text) {
        let sentence = sentence.trim();
        if sentence.chars().count() < MIN_PHRASE_SENTENCE_LENGTH {
            continue;
        }

        let tokens = words(sentence);
        for start in 0..tokens.len().saturating_sub(1) {
            for length in 2..=4 {
                let Some(window) = tokens.get(start..start + length) else {
                    continue;
                };

                let keyword_hits = window.iter().filter(|w| keywords.contains(*w)).count();
                let content_words = window
                    .iter()
                    .filter(|w| !stop.contains(w.as_str()))
                    .count();
                let framed_by_stop_words = stop.contains(window[0].as_str())
                    || stop.contains(window[length - 1].as_str());

                if keyword_hits == 0
                    || content_words < (length / 2).max(1)
                    || framed_by_stop_words
                {
                    continue;
                }

                let phrase = window.join(" ");
                if phrase.len() <= 8 || !seen.insert(phrase.clone()) {
                    continue;
                }

                let density = keyword_hits as f64 / length as f64;
                if density >= 0.5 {
                    let length_bonus = 1.0 + (length as f64 - 2.0) * 0.1;
                    ranked.push((phrase, density * length_bonus));
                }
            }
        }
    }

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(max_phrases)
        .map(|(phrase, _)| phrase)
        .collect()
}

/// Extended English stop-word list.
pub fn stop_words() -> &'static HashSet<&'static str> {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| STOP_WORD_LIST.iter().copied().collect())
}

const STOP_WORD_LIST: &[&str] = &[
    // basic
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "that",
    "with", "have", "this", "will", "your", "from", "they", "know", "want", "been", "good",
    "much", "some", "time", "very", "when", "come", "here", "just", "like", "long", "make",
    "many", "over", "such", "take", "than", "them", "well", "were", "what",
    // common connectives
    "also", "after", "back", "other", "more", "most", "first", "last", "each", "which", "there",
    "would", "could", "should", "about", "into", "only", "think", "where", "being", "both",
    "during", "before", "above", "below", "between", "through", "same", "different", "another",
    "without", "within", "still", "again", "against", "while", "since",
    // articles and prepositions
    "a", "an", "as", "at", "be", "by", "do", "he", "if", "in", "is", "it", "my", "no", "of",
    "on", "or", "so", "to", "up", "we", "me", "am",
    // verbs rarely useful as keywords
    "said", "says", "going", "goes", "went", "came", "made", "makes", "look", "looks", "looked",
    "give", "gives", "gave", "told", "tell", "asked", "ask", "find", "found", "left", "right",
    "start", "started", "stop", "stopped", "turn", "turned", "work", "worked", "play", "played",
    "quot",
    // time and quantity
    "year", "years", "month", "months", "week", "weeks", "today", "tomorrow", "yesterday",
    "always", "never", "often", "sometimes", "usually", "once", "twice", "three", "four", "five",
    "six", "seven", "eight", "nine", "ten",
];
