use keepsake_types::AnalyticsReport;
use serde::Serialize;
use std::fmt;

/// One event condensed to a single line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventLine {
    pub time: String,
    pub event: String,
    pub details: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectViewModel {
    pub store_path: String,
    #[serde(flatten)]
    pub report: AnalyticsReport,
    /// Archived chunks found next to the live log
    pub archived_chunks: usize,
    #[serde(skip)]
    pub recent: Vec<EventLine>,
}

impl fmt::Display for InspectViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Store: {}", self.store_path)?;
        writeln!(f)?;

        match &self.report.stored {
            Some(stored) => {
                writeln!(f, "Stored log")?;
                writeln!(f, "  Session:      {}", stored.session_id)?;
                writeln!(f, "  Interactions: {}", stored.interactions.len())?;
            }
            None => writeln!(f, "Stored log: (none)")?,
        }

        match &self.report.final_snapshot {
            Some(final_snapshot) => {
                writeln!(f, "Final snapshot")?;
                writeln!(f, "  Session:      {}", final_snapshot.session_id)?;
                writeln!(f, "  Interactions: {}", final_snapshot.total_interactions)?;
                writeln!(f, "  Time spent:   {}s", final_snapshot.time_spent)?;
                writeln!(
                    f,
                    "  Exit time:    {}",
                    keepsake_types::format_iso(&final_snapshot.exit_time)
                )?;
            }
            None => writeln!(f, "Final snapshot: (none)")?,
        }

        if self.archived_chunks > 0 {
            writeln!(f, "Archived chunks: {}", self.archived_chunks)?;
        }

        if self.recent.is_empty() {
            return Ok(());
        }

        let total = self
            .report
            .stored
            .as_ref()
            .map(|s| s.interactions.len())
            .unwrap_or(0);
        writeln!(f)?;
        writeln!(f, "Recent events ({} of {}):", self.recent.len(), total)?;
        for line in &self.recent {
            if line.details.is_empty() {
                writeln!(f, "  {}  {}", line.time, line.event)?;
            } else {
                writeln!(f, "  {}  {:<28} {}", line.time, line.event, line.details)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KindCount {
    pub event: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub total_interactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_event_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_seconds: Option<i64>,
    pub by_event: Vec<KindCount>,
}

impl fmt::Display for StatsViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some(session_id) = &self.session_id else {
            writeln!(f, "No stored interactions.")?;
            return Ok(());
        };

        writeln!(f, "Session:      {}", session_id)?;
        writeln!(f, "Interactions: {}", self.total_interactions)?;
        if let (Some(first), Some(last)) = (&self.first_event_at, &self.last_event_at) {
            writeln!(f, "From:         {}", first)?;
            writeln!(f, "To:           {}", last)?;
        }
        if let Some(span) = self.span_seconds {
            writeln!(f, "Span:         {}s", span)?;
        }
        writeln!(f)?;

        writeln!(f, "{:<30} {:>6}", "EVENT", "COUNT")?;
        writeln!(f, "{}", "-".repeat(37))?;
        for row in &self.by_event {
            writeln!(f, "{:<30} {:>6}", row.event, row.count)?;
        }

        Ok(())
    }
}
