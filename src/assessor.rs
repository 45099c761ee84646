//! Response assessor: maps a user reply to an optional category/score/feedback.
//!
//! The rule list is consulted top to bottom and the first match wins, so the
//! order of [`PATTERN_RULES`] decides the category when several rules match.
//! The quality tier comes from word/char length, and mentioning technical
//! vocabulary or giving an example bumps it by exactly one level.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::{Assessment, Category, Level};
use crate::util::word_count;

/// Score and feedback configured for one quality tier of a rule.
#[derive(Clone, Copy, Debug)]
pub struct TierFeedback {
  pub score: u8,
  pub feedback: &'static str,
}

/// How a rule recognises a response.
#[derive(Debug)]
pub enum Matcher {
  /// Case-insensitive regular expression.
  Pattern(Regex),
  /// Case-insensitive substring match against any of the listed terms.
  AnyOf(&'static [&'static str]),
}

impl Matcher {
  fn pattern(source: &str) -> Option<Self> {
    match Regex::new(&format!("(?i){source}")) {
      Ok(re) => Some(Matcher::Pattern(re)),
      Err(e) => {
        warn!(target: "assessor", %source, error = %e, "Skipping invalid assessment pattern");
        None
      }
    }
  }

  pub fn is_match(&self, text: &str) -> bool {
    match self {
      Matcher::Pattern(re) => re.is_match(text),
      Matcher::AnyOf(terms) => {
        let lower = text.to_lowercase();
        terms.iter().any(|t| lower.contains(t))
      }
    }
  }
}

#[derive(Debug)]
pub struct PatternRule {
  pub matcher: Matcher,
  pub category: Category,
  pub basic: TierFeedback,
  pub intermediate: TierFeedback,
  pub advanced: TierFeedback,
}

impl PatternRule {
  pub fn tier(&self, level: Level) -> TierFeedback {
    match level {
      Level::Basic => self.basic,
      Level::Intermediate => self.intermediate,
      Level::Advanced => self.advanced,
    }
  }
}

const fn tier(score: u8, feedback: &'static str) -> TierFeedback {
  TierFeedback { score, feedback }
}

struct RuleSource {
  pattern: &'static str,
  category: Category,
  tiers: [TierFeedback; 3],
}

static RULE_SOURCES: [RuleSource; 4] = [
  RuleSource {
    pattern: "what.*ai|define.*ai|artificial intelligence",
    category: Category::AiUnderstanding,
    tiers: [
      tier(5, "Good start! Try to be more specific about AI capabilities."),
      tier(10, "Nice understanding! Consider mentioning different types of AI."),
      tier(15, "Excellent grasp of AI fundamentals!"),
    ],
  },
  RuleSource {
    pattern: "prompt|instruction|ask.*ai|tell.*ai",
    category: Category::PromptEngineering,
    tiers: [
      tier(5, "You're thinking about prompts! Try to be more specific and detailed."),
      tier(10, "Good prompt awareness! Consider adding context and examples."),
      tier(15, "Great prompt engineering mindset!"),
    ],
  },
  RuleSource {
    pattern: "bias|ethical|responsible|fair|privacy|harm",
    category: Category::EthicalAi,
    tiers: [
      tier(5, "Important ethical consideration! Explore this topic further."),
      tier(10, "Good ethical awareness! Think about specific scenarios."),
      tier(15, "Excellent ethical AI thinking!"),
    ],
  },
  RuleSource {
    pattern: "use.*ai|apply|tool|solve|problem|work|business",
    category: Category::PracticalApplication,
    tiers: [
      tier(5, "Good practical thinking! Be more specific about applications."),
      tier(10, "Nice application ideas! Consider implementation challenges."),
      tier(15, "Excellent practical AI application!"),
    ],
  },
];

/// Ordered rule list, compiled once.
pub static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
  RULE_SOURCES
    .iter()
    .filter_map(|src| {
      let [basic, intermediate, advanced] = src.tiers;
      Matcher::pattern(src.pattern).map(|matcher| PatternRule {
        matcher,
        category: src.category,
        basic,
        intermediate,
        advanced,
      })
    })
    .collect()
});

const TECHNICAL_TERMS: Matcher = Matcher::AnyOf(&[
  "machine learning",
  "neural network",
  "algorithm",
  "model",
  "training",
  "data",
  "nlp",
  "computer vision",
  "deep learning",
]);

const EXAMPLE_PHRASES: Matcher = Matcher::AnyOf(&["example", "instance", "such as", "like", "for example"]);

pub const DEFAULT_SCORE: u8 = 3;
pub const DEFAULT_FEEDBACK: &str = "Thanks for sharing! Try to be more specific about AI concepts.";

/// Minimum word count (exclusive) for the unmatched-but-wordy default.
const DEFAULT_MIN_WORDS: usize = 10;

/// Length-only tier before any vocabulary bonus.
pub fn length_level(words: usize, chars: usize) -> Level {
  if words > 30 && chars > 150 {
    Level::Advanced
  } else if words > 15 && chars > 75 {
    Level::Intermediate
  } else {
    Level::Basic
  }
}

/// True when the response uses technical vocabulary or introduces an example.
pub fn has_bonus_vocabulary(text: &str) -> bool {
  TECHNICAL_TERMS.is_match(text) || EXAMPLE_PHRASES.is_match(text)
}

/// Assess a user reply. `turn_index` is the conversation position; the rules
/// do not currently depend on it.
pub fn assess(text: &str, turn_index: usize) -> Option<Assessment> {
  let words = word_count(text);
  let chars = text.chars().count();

  if let Some(rule) = PATTERN_RULES.iter().find(|r| r.matcher.is_match(text)) {
    let mut level = length_level(words, chars);
    if has_bonus_vocabulary(text) {
      level = level.upgrade();
    }
    let tier = rule.tier(level);
    debug!(target: "assessor", turn_index, words, chars, category = %rule.category, ?level, score = tier.score, "Response matched rule");
    return Some(Assessment {
      category: rule.category,
      score: tier.score,
      feedback: tier.feedback.to_string(),
    });
  }

  if words > DEFAULT_MIN_WORDS {
    debug!(target: "assessor", turn_index, words, "No rule matched; default assessment");
    return Some(Assessment {
      category: Category::AiUnderstanding,
      score: DEFAULT_SCORE,
      feedback: DEFAULT_FEEDBACK.to_string(),
    });
  }

  None
}
