use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub quiz: String,
    pub score: usize,
    pub total_questions: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SimulateViewModel {
    pub session_id: String,
    pub total_interactions: usize,
    pub time_spent: i64,
    pub quiz: QuizOutcome,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
    pub finalized: bool,
    pub store_path: String,
}

impl fmt::Display for SimulateViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Session:      {}", self.session_id)?;
        writeln!(f, "Interactions: {}", self.total_interactions)?;
        writeln!(f, "Time spent:   {}s", self.time_spent)?;
        writeln!(
            f,
            "Quiz ({}):    {}/{}",
            self.quiz.quiz, self.quiz.score, self.quiz.total_questions
        )?;
        writeln!(f, "  {}", self.quiz.message)?;

        match &self.degraded_reason {
            Some(reason) => writeln!(f, "Storage:      in memory only ({})", reason)?,
            None => writeln!(f, "Storage:      {}", self.store_path)?,
        }
        writeln!(
            f,
            "Final:        {}",
            if self.finalized { "written" } else { "skipped" }
        )?;

        Ok(())
    }
}
