//! Rule-based lexicon scorer (VADER-style compounding).
//!
//! # Algorithm
//! ```text
//! tokens (whitespace split, edge punctuation stripped)
//!     → per-token valence from the lexicon
//!         boosters/dampeners in the 3 preceding tokens
//!         negation in the 3 preceding tokens
//!         ALL-CAPS emphasis when the text mixes case
//!         "least" inversion
//!     → contrastive "but" reweighting
//!     → punctuation emphasis (! and ?)
//!     → compound = x / sqrt(x² + 15), clamped to [-1, 1]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::inference::types::{Probabilities, Provenance};
use crate::scoring::lexicon_data::BUILTIN_LEXICON;
use crate::scoring::{Assessment, ScorerError, SentimentScorer};

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

pub const DEFAULT_MAX_TOKENS: usize = 5_000;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "without", "wont", "wouldnt", "uh-uh", "rarely", "seldom", "despite",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("amazingly", BOOST_INCREMENT),
    ("awfully", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("considerably", BOOST_INCREMENT),
    ("decidedly", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT),
    ("enormously", BOOST_INCREMENT),
    ("entirely", BOOST_INCREMENT),
    ("especially", BOOST_INCREMENT),
    ("exceptionally", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("fabulously", BOOST_INCREMENT),
    ("fully", BOOST_INCREMENT),
    ("greatly", BOOST_INCREMENT),
    ("hella", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("hugely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("intensely", BOOST_INCREMENT),
    ("majorly", BOOST_INCREMENT),
    ("more", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("particularly", BOOST_INCREMENT),
    ("purely", BOOST_INCREMENT),
    ("quite", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("remarkably", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("substantially", BOOST_INCREMENT),
    ("thoroughly", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("tremendously", BOOST_INCREMENT),
    ("uber", BOOST_INCREMENT),
    ("unbelievably", BOOST_INCREMENT),
    ("unusually", BOOST_INCREMENT),
    ("utterly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("almost", BOOST_DECREMENT),
    ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT),
    ("kinda", BOOST_DECREMENT),
    ("kindof", BOOST_DECREMENT),
    ("less", BOOST_DECREMENT),
    ("little", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("occasionally", BOOST_DECREMENT),
    ("partly", BOOST_DECREMENT),
    ("scarcely", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
    ("sorta", BOOST_DECREMENT),
    ("sortof", BOOST_DECREMENT),
];

/// Raw scorer output before label/confidence derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityScores {
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl PolarityScores {
    fn neutral() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
        }
    }

    pub fn probabilities(&self) -> Probabilities {
        Probabilities {
            positive: self.positive,
            neutral: self.neutral,
            negative: self.negative,
        }
    }
}

#[derive(Debug)]
struct Token {
    raw: String,
    lower: String,
}

impl Token {
    fn is_all_caps(&self) -> bool {
        self.raw.chars().any(char::is_uppercase) && !self.raw.chars().any(char::is_lowercase)
    }
}

/// Dictionary-backed scorer. Immutable after construction.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
    max_tokens: usize,
}

impl LexiconScorer {
    pub const NAME: &'static str = "vader-lexicon";

    /// Scorer over the compiled-in table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_LEXICON.iter().map(|(word, valence)| (word.to_string(), *valence)))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let lexicon = entries
            .into_iter()
            .map(|(word, valence)| (word.to_lowercase(), valence))
            .collect();
        Self {
            lexicon,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Load a lexicon file in VADER format: `token<TAB>mean[<TAB>...]`.
    pub fn from_file(path: &Path) -> Result<Self, ScorerError> {
        let content = fs::read_to_string(path).map_err(|source| ScorerError::LexiconIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ScorerError> {
        let mut entries = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default();
            let valence = fields.next().ok_or_else(|| ScorerError::LexiconParse {
                line: idx + 1,
                reason: "missing valence column".to_string(),
            })?;
            let valence: f64 = valence.trim().parse().map_err(|e| ScorerError::LexiconParse {
                line: idx + 1,
                reason: format!("valence '{}': {}", valence, e),
            })?;
            entries.push((token.to_string(), valence));
        }
        if entries.is_empty() {
            return Err(ScorerError::LexiconParse {
                line: 0,
                reason: "lexicon has no entries".to_string(),
            });
        }
        Ok(Self::from_entries(entries))
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    pub fn polarity_scores(&self, text: &str) -> Result<PolarityScores, ScorerError> {
        let tokens = tokenize(text);
        if tokens.len() > self.max_tokens {
            return Err(ScorerError::InputTooLarge {
                tokens: tokens.len(),
                max: self.max_tokens,
            });
        }
        if tokens.is_empty() {
            return Ok(PolarityScores::neutral());
        }

        let caps_count = tokens.iter().filter(|t| t.is_all_caps()).count();
        let mixed_caps = caps_count > 0 && caps_count < tokens.len();

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let lower = tokens[i].lower.as_str();
            let kind_of = lower == "kind" && tokens.get(i + 1).is_some_and(|t| t.lower == "of");
            if booster(lower).is_some() || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.token_valence(&tokens, i, mixed_caps));
        }

        apply_contrast(&tokens, &mut sentiments);
        Ok(score_valence(&sentiments, text))
    }

    fn valence(&self, word: &str) -> Option<f64> {
        self.lexicon.get(word).copied()
    }

    fn token_valence(&self, tokens: &[Token], i: usize, mixed_caps: bool) -> f64 {
        let lower = |k: usize| tokens[i - k].lower.as_str();
        let word = lower(0);
        let Some(base) = self.valence(word) else {
            return 0.0;
        };

        let mut valence = base;
        // "no" directly before another lexicon word is a determiner, not a sentiment.
        if word == "no" && tokens.get(i + 1).is_some_and(|t| self.valence(&t.lower).is_some()) {
            valence = 0.0;
        }
        if (i > 0 && lower(1) == "no")
            || (i > 1 && lower(2) == "no")
            || (i > 2 && lower(3) == "no" && matches!(lower(1), "or" | "nor"))
        {
            valence = base * NEGATION_SCALAR;
        }

        if mixed_caps && tokens[i].is_all_caps() {
            valence += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
        }

        for distance in 0..3 {
            if i <= distance {
                break;
            }
            let prev = &tokens[i - (distance + 1)];
            if self.valence(&prev.lower).is_some() {
                continue;
            }
            let mut scalar = scalar_inc_dec(prev, valence, mixed_caps);
            match distance {
                1 => scalar *= 0.95,
                2 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;
            valence = negation_check(valence, tokens, distance, i);
        }

        least_check(valence, tokens, i, |w| self.valence(w).is_some())
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SentimentScorer for LexiconScorer {
    fn assess(&self, text: &str) -> Result<Assessment, ScorerError> {
        let scores = self.polarity_scores(text)?;
        Ok(Assessment::from_compound(scores.compound, scores.probabilities()))
    }

    fn provenance(&self) -> Provenance {
        Provenance::FallbackLexicon
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| {
            let stripped = word.trim_matches(|c: char| c.is_ascii_punctuation());
            // Short tokens keep their punctuation so emoticons survive.
            let raw = if stripped.chars().count() <= 2 { word } else { stripped };
            Token {
                raw: raw.to_string(),
                lower: raw.to_lowercase(),
            }
        })
        .collect()
}

fn booster(word: &str) -> Option<f64> {
    BOOSTERS.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn scalar_inc_dec(token: &Token, valence: f64, mixed_caps: bool) -> f64 {
    let Some(mut scalar) = booster(&token.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if mixed_caps && token.is_all_caps() {
        scalar += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
    }
    scalar
}

fn negation_check(valence: f64, tokens: &[Token], distance: usize, i: usize) -> f64 {
    let lower = |k: usize| tokens[i - k].lower.as_str();
    let intensifier = |w: &str| matches!(w, "so" | "this");
    match distance {
        0 if is_negated(lower(1)) => valence * NEGATION_SCALAR,
        1 if lower(2) == "never" && intensifier(lower(1)) => valence * 1.25,
        1 if lower(2) == "without" && lower(1) == "doubt" => valence,
        1 if is_negated(lower(2)) => valence * NEGATION_SCALAR,
        2 if lower(3) == "never" && (intensifier(lower(2)) || intensifier(lower(1))) => valence * 1.25,
        2 if lower(3) == "without" && (lower(2) == "doubt" || lower(1) == "doubt") => valence,
        2 if is_negated(lower(3)) => valence * NEGATION_SCALAR,
        _ => valence,
    }
}

fn least_check(valence: f64, tokens: &[Token], i: usize, in_lexicon: impl Fn(&str) -> bool) -> f64 {
    if i == 0 {
        return valence;
    }
    let prev = tokens[i - 1].lower.as_str();
    if prev != "least" || in_lexicon(prev) {
        return valence;
    }
    if i > 1 && matches!(tokens[i - 2].lower.as_str(), "at" | "very") {
        valence
    } else {
        valence * NEGATION_SCALAR
    }
}

/// Sentiment after "but" outweighs sentiment before it.
fn apply_contrast(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < pivot {
            *sentiment *= 0.5;
        } else if idx > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_WEIGHT,
        _ => MAX_QUESTION_EMPHASIS,
    };
    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    let emphasis = punctuation_emphasis(text);

    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    let mut neutral_count = 0usize;
    for &s in sentiments {
        if s > 0.0 {
            positive_sum += s + 1.0;
        } else if s < 0.0 {
            negative_sum += s - 1.0;
        } else {
            neutral_count += 1;
        }
    }
    if positive_sum > negative_sum.abs() {
        positive_sum += emphasis;
    } else if positive_sum < negative_sum.abs() {
        negative_sum -= emphasis;
    }

    let total = positive_sum + negative_sum.abs() + neutral_count as f64;
    if total == 0.0 {
        return PolarityScores::neutral();
    }
    PolarityScores {
        compound,
        positive: (positive_sum / total).abs(),
        neutral: (neutral_count as f64 / total).abs(),
        negative: (negative_sum / total).abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::types::Sentiment;

    fn compound(text: &str) -> f64 {
        LexiconScorer::builtin().polarity_scores(text).unwrap().compound
    }

    #[test]
    fn test_positive_sentence() {
        let scorer = LexiconScorer::builtin();
        let assessment = scorer.assess("I love studying at UCLA!").unwrap();
        assert_eq!(assessment.sentiment, Sentiment::Positive);
        assert!(assessment.compound > 0.0 && assessment.compound <= 1.0);
        assert!((0.7..=0.95).contains(&assessment.confidence));
        assert!((assessment.probabilities.total() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_negative_sentence() {
        let assessment = LexiconScorer::builtin()
            .assess("This is the worst service, absolutely terrible")
            .unwrap();
        assert_eq!(assessment.sentiment, Sentiment::Negative);
        assert!(assessment.compound < -0.5);
    }

    #[test]
    fn test_neutral_sentence() {
        let scorer = LexiconScorer::builtin();
        let scores = scorer.polarity_scores("The meeting is on Tuesday").unwrap();
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);

        let assessment = scorer.assess("The meeting is on Tuesday").unwrap();
        assert_eq!(assessment.sentiment, Sentiment::Neutral);
        assert_eq!(assessment.confidence, 1.0);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        let scores = LexiconScorer::builtin().polarity_scores("   ").unwrap();
        assert_eq!(scores, PolarityScores::neutral());
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(compound("I love this") > 0.0);
        assert!(compound("I do not love this") < 0.0);
        assert!(compound("this isn't good") < 0.0);
    }

    #[test]
    fn test_boosters_and_dampeners() {
        let plain = compound("the food was good");
        assert!(compound("the food was very good") > plain);
        assert!(compound("the food was slightly good") < plain);
        assert!(compound("the food was very bad") < compound("the food was bad"));
    }

    #[test]
    fn test_caps_emphasis_needs_mixed_case() {
        assert!(compound("GOOD day") > compound("good day"));
        assert_eq!(compound("GOOD DAY"), compound("good day"));
    }

    #[test]
    fn test_exclamation_and_question_emphasis() {
        let plain = compound("good");
        assert!(compound("good!") > plain);
        assert!(compound("good!!!") > compound("good!"));
        assert_eq!(compound("good!!!!!!"), compound("good!!!!"));
        assert!(compound("good??") > plain);
    }

    #[test]
    fn test_contrast_weights_second_clause() {
        assert!(compound("good but bad") < 0.0);
        assert!(compound("bad but good") > 0.0);
    }

    #[test]
    fn test_least_inverts() {
        assert!(compound("least good") < 0.0);
        assert!(compound("at least good") > 0.0);
    }

    #[test]
    fn test_no_as_determiner() {
        assert!(compound("no problems at all") > 0.0);
    }

    #[test]
    fn test_token_limit() {
        let scorer = LexiconScorer::builtin().with_max_tokens(3);
        let err = scorer.assess("one two three four").unwrap_err();
        assert!(matches!(err, ScorerError::InputTooLarge { tokens: 4, max: 3 }));
        assert!(scorer.assess("one two three").is_ok());
    }

    #[test]
    fn test_parse_vader_format() {
        let scorer = LexiconScorer::parse("Splendiferous\t3.1\t0.3\t[3, 3]\nmeh\t-0.6\n\n").unwrap();
        assert_eq!(scorer.len(), 2);
        assert!(scorer.polarity_scores("splendiferous").unwrap().compound > 0.0);
        assert!(scorer.polarity_scores("meh").unwrap().compound < 0.0);
    }

    #[test]
    fn test_parse_reports_line() {
        let err = LexiconScorer::parse("good\t1.9\nbroken\tabc\n").unwrap_err();
        match err {
            ScorerError::LexiconParse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(LexiconScorer::parse("lonely-token\n").is_err());
        assert!(LexiconScorer::parse("").is_err());
    }
}
