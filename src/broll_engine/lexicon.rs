// SYNOID B-Roll Linguistic Resources
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Stopword list and part-of-speech lexicon used by the text analyzer.
// Both ship embedded in the binary; an extra lexicon file may be merged on top.

use anyhow::{bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

const EMBEDDED_STOPWORDS: &str = include_str!("../../resources/stopwords.txt");
const EMBEDDED_LEXICON: &str = include_str!("../../resources/lexicon.tsv");

/// Penn Treebank part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    CC,
    CD,
    DT,
    EX,
    FW,
    IN,
    JJ,
    JJR,
    JJS,
    LS,
    MD,
    NN,
    NNS,
    NNP,
    NNPS,
    PDT,
    POS,
    PRP,
    PRPS,
    RB,
    RBR,
    RBS,
    RP,
    SYM,
    TO,
    UH,
    VB,
    VBD,
    VBG,
    VBN,
    VBP,
    VBZ,
    WDT,
    WP,
    WPS,
    WRB,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::EX => "EX",
            PosTag::FW => "FW",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::LS => "LS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::NNP => "NNP",
            PosTag::NNPS => "NNPS",
            PosTag::PDT => "PDT",
            PosTag::POS => "POS",
            PosTag::PRP => "PRP",
            PosTag::PRPS => "PRP$",
            PosTag::RB => "RB",
            PosTag::RBR => "RBR",
            PosTag::RBS => "RBS",
            PosTag::RP => "RP",
            PosTag::SYM => "SYM",
            PosTag::TO => "TO",
            PosTag::UH => "UH",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WDT => "WDT",
            PosTag::WP => "WP",
            PosTag::WPS => "WP$",
            PosTag::WRB => "WRB",
        }
    }

    /// Tag prefix "NN".
    pub fn is_noun(&self) -> bool {
        self.as_str().starts_with("NN")
    }

    /// Tag prefix "VB".
    pub fn is_verb(&self) -> bool {
        self.as_str().starts_with("VB")
    }

    pub fn is_adjective(&self) -> bool {
        matches!(self, PosTag::JJ | PosTag::JJR | PosTag::JJS)
    }

    /// Tags after which an ambiguous word reads as a noun ("the run", "a long walk").
    pub fn introduces_noun(&self) -> bool {
        matches!(
            self,
            PosTag::DT | PosTag::PDT | PosTag::PRPS | PosTag::WPS | PosTag::POS | PosTag::CD
        ) || self.is_adjective()
    }

    /// Tags after which an ambiguous word reads as a verb ("dogs run", "we sleep").
    pub fn introduces_verb(&self) -> bool {
        self.is_noun() || matches!(self, PosTag::PRP | PosTag::MD | PosTag::TO | PosTag::WP)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = match s {
            "CC" => PosTag::CC,
            "CD" => PosTag::CD,
            "DT" => PosTag::DT,
            "EX" => PosTag::EX,
            "FW" => PosTag::FW,
            "IN" => PosTag::IN,
            "JJ" => PosTag::JJ,
            "JJR" => PosTag::JJR,
            "JJS" => PosTag::JJS,
            "LS" => PosTag::LS,
            "MD" => PosTag::MD,
            "NN" => PosTag::NN,
            "NNS" => PosTag::NNS,
            "NNP" => PosTag::NNP,
            "NNPS" => PosTag::NNPS,
            "PDT" => PosTag::PDT,
            "POS" => PosTag::POS,
            "PRP" => PosTag::PRP,
            "PRP$" => PosTag::PRPS,
            "RB" => PosTag::RB,
            "RBR" => PosTag::RBR,
            "RBS" => PosTag::RBS,
            "RP" => PosTag::RP,
            "SYM" => PosTag::SYM,
            "TO" => PosTag::TO,
            "UH" => PosTag::UH,
            "VB" => PosTag::VB,
            "VBD" => PosTag::VBD,
            "VBG" => PosTag::VBG,
            "VBN" => PosTag::VBN,
            "VBP" => PosTag::VBP,
            "VBZ" => PosTag::VBZ,
            "WDT" => PosTag::WDT,
            "WP" => PosTag::WP,
            "WP$" => PosTag::WPS,
            "WRB" => PosTag::WRB,
            other => bail!("Unknown part-of-speech tag '{}'", other),
        };
        Ok(tag)
    }
}

/// Stopwords plus word -> candidate tags (most likely first).
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    entries: HashMap<String, Vec<PosTag>>,
}

impl Lexicon {
    /// Parse the embedded resources.
    pub fn embedded() -> Result<Self> {
        let stopwords = parse_stopwords(EMBEDDED_STOPWORDS);
        let entries = parse_lexicon(EMBEDDED_LEXICON).context("Embedded tagger lexicon is corrupt")?;
        if stopwords.is_empty() || entries.is_empty() {
            bail!("Embedded linguistic resources are empty");
        }
        Ok(Self { stopwords, entries })
    }

    /// Embedded resources, optionally extended by a lexicon file on disk.
    ///
    /// A file that cannot be read is retried once with diagnostics before the
    /// error is returned; callers treat that as fatal.
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut lexicon = Self::embedded()?;

        if let Some(path) = extra {
            let text = read_with_retry(path)?;
            let extra_entries = parse_lexicon(&text)
                .with_context(|| format!("Malformed lexicon file {:?}", path))?;
            info!("[ANALYZER] Merged {} lexicon entries from {:?}", extra_entries.len(), path);
            lexicon.entries.extend(extra_entries);
        }

        debug!(
            "[ANALYZER] Lexicon ready: {} stopwords, {} entries",
            lexicon.stopwords.len(),
            lexicon.entries.len()
        );
        Ok(lexicon)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn tags(&self, word: &str) -> Option<&[PosTag]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

fn read_with_retry(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(first) => {
            warn!("[ANALYZER] Could not read lexicon {:?}: {}. Retrying once...", path, first);
            let exists = path.exists();
            debug!("[ANALYZER] Lexicon path exists: {}, is_file: {}", exists, path.is_file());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to load lexicon resource {:?}", path))
        }
    }
}

fn parse_stopwords(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

fn parse_lexicon(text: &str) -> Result<HashMap<String, Vec<PosTag>>> {
    let mut entries = HashMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((word, tags)) = line.split_once('\t') else {
            bail!("line {}: expected '<word>\\t<tags>', got '{}'", index + 1, line);
        };

        let tags = tags
            .split_whitespace()
            .map(PosTag::from_str)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("line {}", index + 1))?;

        if tags.is_empty() {
            bail!("line {}: no tags for '{}'", index + 1, word);
        }

        entries.insert(word.trim().to_lowercase(), tags);
    }

    Ok(entries)
}
