//! Canned dialogue content: greeting, fallback reply, follow-up prompt tiers,
//! encouragement phrases and tips. Guarantees the conversation can continue
//! even without the hosted model.

/// First assistant message of every session.
pub const GREETING: &str = "Hello! I'm Jimmy AI, your AI Proficiency Professor. I'm here to help you improve your AI skills through interactive conversations. Let's start with a simple question: What do you think AI is, and how do you currently use it in your daily life?";

/// Assistant message substituted when the gateway cannot be reached.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble connecting right now. Let me ask you this: Can you tell me more about your experience with AI tools? This will help me understand your current proficiency level.";

/// Default persona instruction sent upstream ahead of the transcript.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are \"Jimmy AI - The AI Proficiency Professor\". Your goal is to help users understand and improve their AI skills. Explain everything in simple, everyday language that anyone can understand - avoid technical jargon and use relatable examples. Think of yourself as a friendly teacher talking to someone who might be completely new to AI. Keep responses concise (2-3 sentences) but make sure they're crystal clear. When assessing proficiency, give practical, actionable advice that feels encouraging rather than overwhelming.";

/// Follow-up questions, grouped by conversation depth (introductory, intermediate, advanced).
pub const PROMPT_TIERS: [[&str; 3]; 3] = [
  [
    "That's a great start! I can see you have some understanding of AI. Let me ask you this: Can you describe a specific situation where you think AI might be helpful in your daily life?",
    "Interesting perspective! Now, let's dive deeper. What do you think are some limitations or challenges that AI systems face today?",
    "I appreciate your thoughtful response. Here's a scenario for you: If you were to use AI to help write an email, how would you structure your request to get the best result?",
  ],
  [
    "Excellent thinking! Let's explore prompt engineering. Can you give me an example of how you would ask an AI to help you solve a specific problem you're facing?",
    "Great insight! Now, considering AI ethics: What concerns might arise when AI systems are used to make important decisions about people's lives?",
    "That shows good understanding! Let's talk about practical applications. Can you think of three different ways AI could be used in education?",
  ],
  [
    "Impressive knowledge! Here's a challenge: How would you explain the difference between narrow AI and general AI to someone who's never heard these terms?",
    "Excellent analysis! Let's discuss bias in AI. Can you describe how bias might creep into an AI system and suggest ways to mitigate it?",
    "Outstanding! Now for a practical scenario: You're tasked with implementing an AI solution for a small business. Walk me through your approach.",
  ],
];

/// Encouragement prefixes; `{category}` is replaced with the human-readable category name.
pub const ENCOURAGEMENTS: [&str; 3] = [
  "I can see you're developing strong skills in {category}. ",
  "Your understanding of {category} is improving! ",
  "Great progress in {category}! ",
];

pub const TIPS: [&str; 3] = [
  "\n\n💡 Tip: When working with AI, always be specific about what you want and provide context for better results.",
  "\n\n💡 Tip: Remember that AI systems learn from data, so they can reflect biases present in that data.",
  "\n\n💡 Tip: The key to good prompting is being clear, specific, and providing examples when possible.",
];

/// Study plan for one category, shown while its score is below the
/// strength threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendationSeed {
  pub high_priority: bool,
  pub title: &'static str,
  pub description: &'static str,
  pub actions: [&'static str; 3],
}

pub const PROMPT_ENGINEERING_PLAN: RecommendationSeed = RecommendationSeed {
  high_priority: true,
  title: "Master the Art of Prompting",
  description: "Learn to craft clear, specific, and effective prompts for better AI responses.",
  actions: [
    "Practice writing detailed prompts with context",
    "Learn about prompt templates and structures",
    "Experiment with different prompting techniques",
  ],
};

pub const AI_UNDERSTANDING_PLAN: RecommendationSeed = RecommendationSeed {
  high_priority: true,
  title: "Deepen Your AI Knowledge",
  description: "Build a stronger foundation in AI concepts, capabilities, and limitations.",
  actions: [
    "Study different types of AI models and their uses",
    "Learn about AI training processes and data requirements",
    "Understand the difference between narrow and general AI",
  ],
};

pub const ETHICAL_AI_PLAN: RecommendationSeed = RecommendationSeed {
  high_priority: false,
  title: "Develop Ethical AI Awareness",
  description: "Learn about responsible AI usage, bias, and ethical considerations.",
  actions: [
    "Study AI bias and fairness principles",
    "Learn about privacy and data protection in AI",
    "Understand the societal impact of AI systems",
  ],
};

pub const PRACTICAL_APPLICATION_PLAN: RecommendationSeed = RecommendationSeed {
  high_priority: false,
  title: "Apply AI to Real Problems",
  description: "Practice using AI tools to solve practical, real-world challenges.",
  actions: [
    "Identify problems in your work/life that AI can help solve",
    "Experiment with different AI tools and platforms",
    "Create projects that demonstrate AI application",
  ],
};
