// SYNOID B-Roll Text Analyzer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Turns narration text into search keywords:
// sentences -> lowercase word tokens -> stopword/punctuation filter -> POS tags -> nouns & verbs.

use crate::broll_engine::lexicon::{Lexicon, PosTag};
use crate::config::BrollConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

/// How many keywords `classify` reports.
pub const CLASSIFY_LIMIT: usize = 5;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["')\]]*(?:\s+|$)"#).unwrap());

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}_]+(?:'[\p{L}\p{N}]+)*|[^\s\p{L}\p{N}_]").unwrap()
});

/// Words whose trailing period does not end a sentence, in any case.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "approx",
    "inc", "ltd", "fig", "mt", "ave", "dept", "jan", "feb", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov",
];

/// Abbreviations that are also plain words ("no", "mar"). They only hold the
/// sentence open when capitalised and followed by a number or a lowercase word,
/// as in "No. 5" or "Acme Co. ships".
const CAPITALISED_ABBREVIATIONS: &[&str] = &["No", "Co", "Mar", "Dec"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "less", "ish", "ical"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: PosTag,
}

pub struct TextAnalyzer {
    lexicon: Lexicon,
}

impl TextAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Load linguistic resources once at startup. Errors here are fatal for the caller.
    pub fn load(config: &BrollConfig) -> Result<Self> {
        let lexicon = Lexicon::load(config.lexicon_path.as_deref())
            .context("Linguistic resources unavailable")?;
        info!("[ANALYZER] Text analyzer ready");
        Ok(Self::new(lexicon))
    }

    /// Embedded resources only.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Lexicon::embedded()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Split text on sentence terminators, keeping abbreviations and initials intact.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_END.find_iter(text) {
            let terminator = m.as_str().trim_end();
            if terminator == "." && ends_with_abbreviation(&text[start..m.start()], &text[m.end()..]) {
                continue;
            }

            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }

    /// Lowercase word tokens. Punctuation becomes its own token and
    /// contractions are split ("don't" -> "do", "n't").
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        let lowered = sentence.to_lowercase();
        let mut tokens = Vec::new();

        for m in WORD.find_iter(&lowered) {
            let word = m.as_str();
            if !word.contains('\'') {
                tokens.push(word.to_string());
                continue;
            }

            if let Some(stem) = word.strip_suffix("n't").filter(|s| !s.is_empty() && !s.contains('\'')) {
                tokens.push(stem.to_string());
                tokens.push("n't".to_string());
            } else if let Some((head, tail)) = word.split_once('\'') {
                tokens.push(head.to_string());
                tokens.push(format!("'{}", tail));
            }
        }

        tokens
    }

    /// Assign a Penn Treebank tag to each token.
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let candidates: Vec<Vec<PosTag>> = tokens.iter().map(|t| self.candidates(t)).collect();
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());

        for (i, word) in tokens.iter().enumerate() {
            let prev = tagged.last().map(|t| t.tag);
            let next = candidates.get(i + 1).and_then(|c| c.first().copied());
            let tag = resolve(&candidates[i], prev, next);
            tagged.push(TaggedToken {
                word: word.clone(),
                tag,
            });
        }

        tagged
    }

    /// Keywords of one sentence, in order of first appearance, without duplicates.
    pub fn sentence_keywords(&self, sentence: &str) -> Vec<String> {
        let tokens: Vec<String> = self
            .tokenize(sentence)
            .into_iter()
            .filter(|t| is_alphanumeric(t) && !self.lexicon.is_stopword(t))
            .collect();

        let mut seen = HashSet::new();
        self.tag(&tokens)
            .into_iter()
            .filter(|t| t.tag.is_noun() || t.tag.is_verb())
            .filter(|t| seen.insert(t.word.clone()))
            .map(|t| t.word)
            .collect()
    }

    /// Keywords per sentence, in sentence order.
    pub fn keywords_by_sentence(&self, text: &str) -> Vec<Vec<String>> {
        self.split_sentences(text)
            .iter()
            .map(|sentence| {
                let keywords = self.sentence_keywords(sentence);
                debug!("[ANALYZER] '{}' -> {:?}", sentence, keywords);
                keywords
            })
            .collect()
    }

    /// Distinct noun/verb keywords across the whole text.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let keywords = dedupe(self.keywords_by_sentence(text).into_iter().flatten());
        info!("[ANALYZER] Extracted {} keywords", keywords.len());
        keywords
    }

    /// Placeholder categorizer: the first few keywords.
    pub fn classify(&self, text: &str) -> Vec<String> {
        let mut keywords = self.extract_keywords(text);
        keywords.truncate(CLASSIFY_LIMIT);
        keywords
    }

    fn candidates(&self, word: &str) -> Vec<PosTag> {
        if let Some(tags) = self.lexicon.tags(word) {
            return tags.to_vec();
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            return vec![PosTag::CD];
        }

        let len = word.chars().count();

        if len > 4 && word.ends_with("ing") {
            return vec![PosTag::VBG];
        }
        if len > 3 && word.ends_with("ed") {
            return vec![PosTag::VBD, PosTag::VBN];
        }
        if len > 3 && word.ends_with("ly") {
            return vec![PosTag::RB];
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return vec![PosTag::JJ];
        }

        if len > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
            let inflected = self.inflect_from_stem(word);
            if !inflected.is_empty() {
                return inflected;
            }
            return vec![PosTag::NNS];
        }

        vec![PosTag::NN]
    }

    /// "parks" -> NNS via "park", "runs" -> VBZ/NNS via "run".
    fn inflect_from_stem(&self, word: &str) -> Vec<PosTag> {
        let mut stems = Vec::new();
        if let Some(stem) = word.strip_suffix("ies") {
            stems.push(format!("{}y", stem));
        }
        if let Some(stem) = word.strip_suffix("es") {
            stems.push(stem.to_string());
        }
        if let Some(stem) = word.strip_suffix('s') {
            stems.push(stem.to_string());
        }

        for stem in stems {
            if let Some(tags) = self.lexicon.tags(&stem) {
                let inflected: Vec<PosTag> = tags
                    .iter()
                    .filter_map(|t| match t {
                        PosTag::NN => Some(PosTag::NNS),
                        PosTag::VB => Some(PosTag::VBZ),
                        _ => None,
                    })
                    .collect();
                if !inflected.is_empty() {
                    return inflected;
                }
            }
        }

        Vec::new()
    }
}

fn resolve(candidates: &[PosTag], prev: Option<PosTag>, next: Option<PosTag>) -> PosTag {
    let first = candidates.first().copied().unwrap_or(PosTag::NN);
    if candidates.len() < 2 {
        return first;
    }

    let adjective = candidates.iter().copied().find(PosTag::is_adjective);
    let noun = candidates.iter().copied().find(PosTag::is_noun);
    let verb = candidates.iter().copied().find(PosTag::is_verb);

    if let (Some(adj), Some(next)) = (adjective, next) {
        if next.is_noun() {
            return adj;
        }
    }

    match prev {
        Some(p) if p.introduces_noun() && noun.is_some() => noun.unwrap_or(first),
        Some(p) if p.introduces_verb() && verb.is_some() => match verb {
            Some(PosTag::VB) if p.is_noun() || p == PosTag::PRP => PosTag::VBP,
            Some(v) => v,
            None => first,
        },
        _ => first,
    }
}

/// Whether the period closing `before` belongs to an abbreviation or initial
/// rather than ending the sentence. `after` is the text following it.
fn ends_with_abbreviation(before: &str, after: &str) -> bool {
    let mut words = before.split_whitespace().rev();
    let Some(last) = words.next() else {
        return false;
    };
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    let next = after
        .split_whitespace()
        .next()
        .and_then(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()).chars().next());

    let mut chars = last.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        // "J. Smith", "John F. Kennedy" but not "gate B. Cats"
        let prev_capitalised = words
            .next()
            .map_or(true, |w| w.chars().next().is_some_and(char::is_uppercase));
        return letter.is_uppercase() && prev_capitalised && next.is_some_and(char::is_uppercase);
    }

    if CAPITALISED_ABBREVIATIONS.contains(&last) {
        return next.is_some_and(|c| c.is_ascii_digit() || c.is_lowercase());
    }
    ABBREVIATIONS.contains(&last.to_lowercase().as_str())
}

fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Keep the first occurrence of each keyword.
pub fn dedupe<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TextAnalyzer {
        TextAnalyzer::embedded().unwrap()
    }

    fn tags_of(analyzer: &TextAnalyzer, words: &[&str]) -> Vec<&'static str> {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        analyzer.tag(&tokens).iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_split_sentences() {
        let a = analyzer();
        let sentences = a.split_sentences("Dogs run in parks. Cats sleep indoors.");
        assert_eq!(sentences, vec!["Dogs run in parks.", "Cats sleep indoors."]);

        let sentences = a.split_sentences("Wow! Is it raining? Yes");
        assert_eq!(sentences, vec!["Wow!", "Is it raining?", "Yes"]);
    }

    #[test]
    fn test_split_keeps_abbreviations() {
        let a = analyzer();
        let sentences = a.split_sentences("Dr. Smith films birds, e.g. owls. Then he rests.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Dr. Smith"));
    }

    #[test]
    fn test_split_ordinary_words_end_sentences() {
        let a = analyzer();
        assert_eq!(
            a.split_sentences("The answer was no. Dogs run home."),
            vec!["The answer was no.", "Dogs run home."]
        );
        assert_eq!(
            a.split_sentences("Prices rose in mar. Cats sleep."),
            vec!["Prices rose in mar.", "Cats sleep."]
        );
        assert_eq!(a.split_sentences("See room No. 5 today. Birds sing.").len(), 2);
    }

    #[test]
    fn test_split_single_letters_only_hold_as_initials() {
        let a = analyzer();
        assert_eq!(
            a.split_sentences("We met at gate B. Cats sleep."),
            vec!["We met at gate B.", "Cats sleep."]
        );
        assert_eq!(
            a.split_sentences("John F. Kennedy spoke. Crowds cheered."),
            vec!["John F. Kennedy spoke.", "Crowds cheered."]
        );
        assert_eq!(a.split_sentences("J. Smith films owls. Owls fly.").len(), 2);
    }

    #[test]
    fn test_split_empty() {
        assert!(analyzer().split_sentences("   ").is_empty());
    }

    #[test]
    fn test_tokenize_punctuation_and_contractions() {
        let a = analyzer();
        assert_eq!(
            a.tokenize("Don't stop, Dogs!"),
            vec!["do", "n't", "stop", ",", "dogs", "!"]
        );
        assert_eq!(a.tokenize("It's sunny"), vec!["it", "'s", "sunny"]);
    }

    #[test]
    fn test_tagging_rules() {
        let a = analyzer();
        assert_eq!(tags_of(&a, &["dogs", "run", "parks"]), vec!["NNS", "VBP", "NNS"]);
        assert_eq!(tags_of(&a, &["quickly"]), vec!["RB"]);
        assert_eq!(tags_of(&a, &["jumping"]), vec!["VBG"]);
        assert_eq!(tags_of(&a, &["beautiful", "sunset"]), vec!["JJ", "NN"]);
        assert_eq!(tags_of(&a, &["2024"]), vec!["CD"]);
        assert_eq!(tags_of(&a, &["long", "walk"]), vec!["JJ", "NN"]);
        assert_eq!(tags_of(&a, &["would", "sleep"]), vec!["MD", "VB"]);
    }

    #[test]
    fn test_sentence_keywords() {
        let a = analyzer();
        assert_eq!(a.sentence_keywords("Dogs run in parks."), vec!["dogs", "run", "parks"]);
        assert_eq!(a.sentence_keywords("Cats sleep indoors."), vec!["cats", "sleep", "indoors"]);
    }

    #[test]
    fn test_extract_keywords_filters_non_content_words() {
        let a = analyzer();
        let keywords = a.extract_keywords("The very quick dog quickly jumps over the lazy fox!");
        assert!(keywords.contains(&"dog".to_string()));
        assert!(keywords.contains(&"jumps".to_string()));
        assert!(keywords.contains(&"fox".to_string()));
        assert!(!keywords.contains(&"quickly".to_string()));
        assert!(!keywords.contains(&"lazy".to_string()));
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"!".to_string()));
    }

    #[test]
    fn test_extract_keywords_deduplicates_across_sentences() {
        let a = analyzer();
        let keywords = a.extract_keywords("Dogs run. Dogs run fast. Dogs!");
        assert_eq!(keywords.iter().filter(|k| *k == "dogs").count(), 1);
        assert_eq!(keywords.iter().filter(|k| *k == "run").count(), 1);
    }

    #[test]
    fn test_extract_keywords_invariants() {
        let a = analyzer();
        let text = "Honestly, we don't know why the ocean waves crash so loudly tonight. \
                    Mr. Green's camera captured 3 seagulls diving; it was amazing!";

        let sentences = a.split_sentences(text);
        assert_eq!(sentences.len(), 2);
        for sentence in &sentences {
            let filtered: Vec<String> = a
                .tokenize(sentence)
                .into_iter()
                .filter(|t| is_alphanumeric(t) && !a.lexicon().is_stopword(t))
                .collect();
            let tagged = a.tag(&filtered);

            for keyword in a.sentence_keywords(sentence) {
                assert!(!a.lexicon().is_stopword(&keyword), "stopword leaked: {}", keyword);
                assert!(keyword.chars().all(char::is_alphanumeric), "punctuation leaked: {}", keyword);
                assert!(
                    tagged
                        .iter()
                        .any(|t| t.word == keyword && (t.tag.is_noun() || t.tag.is_verb())),
                    "{} is not a noun or verb in '{}': {:?}",
                    keyword,
                    sentence,
                    tagged
                );
            }
        }

        let all = a.extract_keywords(text);
        assert!(all.contains(&"ocean".to_string()));
        assert!(!all.contains(&"loudly".to_string()));
    }

    #[test]
    fn test_classify_truncates() {
        let a = analyzer();
        let text = "Dogs run in parks. Cats sleep indoors. Birds fly over mountains and rivers.";
        let categories = a.classify(text);
        assert_eq!(categories.len(), CLASSIFY_LIMIT);
        assert_eq!(categories, a.extract_keywords(text)[..CLASSIFY_LIMIT].to_vec());
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let a = analyzer();
        assert!(a.extract_keywords("").is_empty());
        assert!(a.extract_keywords("... !!! ,,,").is_empty());
        assert!(a.classify("the and of").is_empty());
    }
}
