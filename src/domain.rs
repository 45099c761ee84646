//! Domain models: roles, proficiency categories, assessments, messages and the
//! per-session proficiency score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::seeds::{
  RecommendationSeed, AI_UNDERSTANDING_PLAN, ETHICAL_AI_PLAN, PRACTICAL_APPLICATION_PLAN,
  PROMPT_ENGINEERING_PLAN,
};
use crate::util::humanize_camel;

/// Who authored a message?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  User,
  Assistant,
}

/// The four skill areas tracked by the proficiency score.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
  PromptEngineering,
  AiUnderstanding,
  #[serde(rename = "ethicalAI")]
  EthicalAi,
  PracticalApplication,
}

impl Category {
  /// Dashboard order.
  pub const ALL: [Category; 4] = [
    Category::PromptEngineering,
    Category::AiUnderstanding,
    Category::EthicalAi,
    Category::PracticalApplication,
  ];

  /// Identifier as used on the wire and in the dashboard ("ethicalAI", ...).
  pub fn key(self) -> &'static str {
    match self {
      Category::PromptEngineering => "promptEngineering",
      Category::AiUnderstanding => "aiUnderstanding",
      Category::EthicalAi => "ethicalAI",
      Category::PracticalApplication => "practicalApplication",
    }
  }

  /// Lower-case words split on camel-case boundaries, e.g. "prompt engineering".
  pub fn display_name(self) -> String {
    humanize_camel(self.key())
  }

  /// Heading used in the results report.
  pub fn title(self) -> &'static str {
    match self {
      Category::PromptEngineering => "Prompt Engineering",
      Category::AiUnderstanding => "AI Understanding",
      Category::EthicalAi => "Ethical AI",
      Category::PracticalApplication => "Practical Application",
    }
  }

  fn plan(self) -> &'static RecommendationSeed {
    match self {
      Category::PromptEngineering => &PROMPT_ENGINEERING_PLAN,
      Category::AiUnderstanding => &AI_UNDERSTANDING_PLAN,
      Category::EthicalAi => &ETHICAL_AI_PLAN,
      Category::PracticalApplication => &PRACTICAL_APPLICATION_PLAN,
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.key())
  }
}

/// Quality tier of a matched response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Basic,
  Intermediate,
  Advanced,
}

impl Level {
  /// One step up; `Advanced` saturates.
  pub fn upgrade(self) -> Self {
    match self {
      Level::Basic => Level::Intermediate,
      Level::Intermediate | Level::Advanced => Level::Advanced,
    }
  }
}

/// Scoring outcome attached to a user message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assessment {
  pub category: Category,
  /// 0..=15
  pub score: u8,
  pub feedback: String,
}

/// One entry of the transcript.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
  pub id: Uuid,
  pub role: Role,
  pub content: String,
  pub created_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assessment: Option<Assessment>,
}

impl Message {
  pub fn new(role: Role, content: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      role,
      content: content.into(),
      created_at: Utc::now(),
      assessment: None,
    }
  }

  pub fn to_turn(&self) -> ChatTurn {
    ChatTurn { role: self.role, content: self.content.clone() }
  }
}

/// The `{role, content}` pair sent over the wire; no ids or timestamps.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
  pub role: Role,
  pub content: String,
}

/// Per-session competency score. Every field is in 0..=100.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Proficiency {
  pub overall: u32,
  pub prompt_engineering: u32,
  pub ai_understanding: u32,
  #[serde(rename = "ethicalAI")]
  pub ethical_ai: u32,
  pub practical_application: u32,
}

impl Proficiency {
  pub const MAX: u32 = 100;

  pub fn get(&self, category: Category) -> u32 {
    match category {
      Category::PromptEngineering => self.prompt_engineering,
      Category::AiUnderstanding => self.ai_understanding,
      Category::EthicalAi => self.ethical_ai,
      Category::PracticalApplication => self.practical_application,
    }
  }

  fn slot_mut(&mut self, category: Category) -> &mut u32 {
    match category {
      Category::PromptEngineering => &mut self.prompt_engineering,
      Category::AiUnderstanding => &mut self.ai_understanding,
      Category::EthicalAi => &mut self.ethical_ai,
      Category::PracticalApplication => &mut self.practical_application,
    }
  }

  /// Rounded (half-up) mean of the four categories.
  pub fn mean_of_categories(&self) -> u32 {
    let sum = self.prompt_engineering
      + self.ai_understanding
      + self.ethical_ai
      + self.practical_application;
    (sum + 2) / 4
  }

  /// Add the assessment's score to its category (clamped to 100) and
  /// recompute `overall` from scratch.
  pub fn apply(&self, assessment: &Assessment) -> Self {
    let mut next = *self;
    let slot = next.slot_mut(assessment.category);
    *slot = (*slot + u32::from(assessment.score)).min(Self::MAX);
    next.overall = next.mean_of_categories();
    next
  }
}

/// Band a 0..=100 score falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProficiencyLevel {
  Novice,
  Beginner,
  Intermediate,
  Advanced,
  Expert,
}

impl ProficiencyLevel {
  pub fn for_score(score: u32) -> Self {
    match score {
      80.. => ProficiencyLevel::Expert,
      60..=79 => ProficiencyLevel::Advanced,
      40..=59 => ProficiencyLevel::Intermediate,
      20..=39 => ProficiencyLevel::Beginner,
      _ => ProficiencyLevel::Novice,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      ProficiencyLevel::Novice => "Novice",
      ProficiencyLevel::Beginner => "Beginner",
      ProficiencyLevel::Intermediate => "Intermediate",
      ProficiencyLevel::Advanced => "Advanced",
      ProficiencyLevel::Expert => "Expert",
    }
  }
}

impl std::fmt::Display for ProficiencyLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
  High,
  Medium,
}

/// Study suggestion for a category that is not yet a strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recommendation {
  pub category: Category,
  pub priority: Priority,
  pub title: &'static str,
  pub description: &'static str,
  pub actions: [&'static str; 3],
}

impl Proficiency {
  /// Category scores at or above this count as strengths.
  pub const STRENGTH_THRESHOLD: u32 = 60;

  pub fn level(&self) -> ProficiencyLevel {
    ProficiencyLevel::for_score(self.overall)
  }

  /// One entry per category below the strength threshold, in dashboard order.
  pub fn recommendations(&self) -> Vec<Recommendation> {
    Category::ALL
      .into_iter()
      .filter(|c| self.get(*c) < Self::STRENGTH_THRESHOLD)
      .map(|category| {
        let plan = category.plan();
        Recommendation {
          category,
          priority: if plan.high_priority { Priority::High } else { Priority::Medium },
          title: plan.title,
          description: plan.description,
          actions: plan.actions,
        }
      })
      .collect()
  }

  /// Categories (with their scores) at or above the strength threshold.
  pub fn strengths(&self) -> Vec<(Category, u32)> {
    Category::ALL
      .into_iter()
      .map(|c| (c, self.get(c)))
      .filter(|(_, score)| *score >= Self::STRENGTH_THRESHOLD)
      .collect()
  }
}

/// Free-function form of [`Proficiency::apply`].
pub fn update_proficiency(current: &Proficiency, assessment: &Assessment) -> Proficiency {
  current.apply(assessment)
}
