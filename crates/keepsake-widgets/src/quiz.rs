use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            "C" => Ok(Choice::C),
            "D" => Ok(Choice::D),
            other => Err(format!("unknown choice '{}' (expected A-D)", other)),
        }
    }
}

impl TryFrom<char> for Choice {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        c.encode_utf8(&mut buf).parse()
    }
}

/// When a result message applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// Every answer correct
    Perfect,
    /// At least this many correct
    AtLeast(usize),
    /// Fallback
    Otherwise,
}

impl ScoreTier {
    fn matches(&self, score: usize, total: usize) -> bool {
        match *self {
            ScoreTier::Perfect => score == total,
            ScoreTier::AtLeast(min) => score >= min,
            ScoreTier::Otherwise => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub when: ScoreTier,
    pub message: &'static str,
}

/// Answer key and result messages for one quiz. Tiers are checked in order
/// and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizDefinition {
    pub name: &'static str,
    pub answer_key: &'static [Choice],
    pub tiers: &'static [Tier],
}

const PERFECT: &str =
    "Perfect! You know us so well! 💕 You truly pay attention to every detail of our relationship.";
const STILL_LEARNING: &str =
    "We have so much more to learn about each other! 💖 That's what makes our journey exciting.";

impl QuizDefinition {
    pub const TEN_QUESTIONS: QuizDefinition = QuizDefinition {
        name: "ten",
        answer_key: &[
            Choice::C,
            Choice::C,
            Choice::A,
            Choice::D,
            Choice::D,
            Choice::B,
            Choice::A,
            Choice::D,
            Choice::C,
            Choice::D,
        ],
        tiers: &[
            Tier {
                when: ScoreTier::Perfect,
                message: PERFECT,
            },
            Tier {
                when: ScoreTier::AtLeast(8),
                message: "Amazing! You know us incredibly well! 🌟 You're truly connected to every aspect of our relationship.",
            },
            Tier {
                when: ScoreTier::AtLeast(6),
                message: "Great job! You know us pretty well! 😊 There's always more to discover about each other.",
            },
            Tier {
                when: ScoreTier::AtLeast(4),
                message: "Good effort! You're learning about us! 💕 Keep discovering more about our beautiful relationship.",
            },
            Tier {
                when: ScoreTier::Otherwise,
                message: STILL_LEARNING,
            },
        ],
    };

    pub const FIVE_QUESTIONS: QuizDefinition = QuizDefinition {
        name: "five",
        answer_key: &[Choice::A, Choice::D, Choice::D, Choice::D, Choice::D],
        tiers: &[
            Tier {
                when: ScoreTier::Perfect,
                message: PERFECT,
            },
            Tier {
                when: ScoreTier::AtLeast(3),
                message: "Great job! You know us pretty well! 😊 There's always more to discover about each other.",
            },
            Tier {
                when: ScoreTier::Otherwise,
                message: STILL_LEARNING,
            },
        ],
    };

    pub fn total_questions(&self) -> usize {
        self.answer_key.len()
    }

    /// Correct answer for a 1-based question number.
    pub fn correct_answer(&self, question: usize) -> Option<Choice> {
        question
            .checked_sub(1)
            .and_then(|idx| self.answer_key.get(idx))
            .copied()
    }

    pub fn score(&self, answers: &BTreeMap<usize, Choice>) -> usize {
        (1..=self.total_questions())
            .filter(|q| answers.get(q).copied() == self.correct_answer(*q))
            .count()
    }

    /// Message for a score, or an empty string if no tier matches.
    pub fn message_for(&self, score: usize) -> &'static str {
        let total = self.total_questions();
        self.tiers
            .iter()
            .find(|tier| tier.when.matches(score, total))
            .map(|tier| tier.message)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: usize,
    pub total_questions: usize,
    pub message: &'static str,
    pub answers: BTreeMap<usize, Choice>,
}

impl QuizResult {
    pub fn score_text(&self) -> String {
        format!(
            "You scored {} out of {}!",
            self.score, self.total_questions
        )
    }
}

/// Quiz progress: current question (1-based) and the answers so far.
#[derive(Debug, Clone)]
pub struct Quiz {
    definition: QuizDefinition,
    current: usize,
    answers: BTreeMap<usize, Choice>,
    result: Option<QuizResult>,
}

impl Quiz {
    pub fn new(definition: QuizDefinition) -> Self {
        Self {
            definition,
            current: 1,
            answers: BTreeMap::new(),
            result: None,
        }
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn answers(&self) -> &BTreeMap<usize, Choice> {
        &self.answers
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn is_last(&self) -> bool {
        self.current == self.definition.total_questions()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 1
    }

    pub fn can_advance(&self) -> bool {
        self.answers.contains_key(&self.current)
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_last() { "Finish Quiz" } else { "Next" }
    }

    /// Record an answer. Question numbers outside the quiz are ignored.
    pub fn select_answer(&mut self, question: usize, choice: Choice, recorder: &mut dyn Recorder) {
        if question == 0 || question > self.definition.total_questions() {
            debug!(question, "ignoring answer for unknown question");
            return;
        }

        self.answers.insert(question, choice);
        recorder.record(
            EventData::from(EventKind::QuizAnswer)
                .with("question", question)
                .with("answer", choice.as_str()),
        );
    }

    /// Move to the next question. Returns false on the last question.
    pub fn next(&mut self) -> bool {
        if self.current >= self.definition.total_questions() {
            debug!(current = self.current, "already at last question");
            return false;
        }
        self.current += 1;
        debug!(current = self.current, "moved to next question");
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        debug!(current = self.current, "moved to previous question");
        true
    }

    /// Score the quiz, pick the result message and log completion.
    pub fn finish(&mut self, recorder: &mut dyn Recorder) -> QuizResult {
        let score = self.definition.score(&self.answers);
        let result = QuizResult {
            score,
            total_questions: self.definition.total_questions(),
            message: self.definition.message_for(score),
            answers: self.answers.clone(),
        };

        debug!(quiz = self.definition.name, score, "quiz finished");
        recorder.record(
            EventData::from(EventKind::QuizCompleted)
                .with("score", result.score)
                .with("totalQuestions", result.total_questions)
                .with_json("answers", &result.answers),
        );

        self.result = Some(result.clone());
        result
    }

    pub fn restart(&mut self, recorder: &mut dyn Recorder) {
        self.current = 1;
        self.answers.clear();
        self.result = None;
        recorder.record(EventData::from(EventKind::QuizRestarted));
    }
}
