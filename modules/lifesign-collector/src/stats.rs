use lifesign_common::Severity;

/// Counters accumulated over one collection run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub queries_issued: u32,
    pub results_seen: u32,
    pub duplicates_skipped: u32,
    pub empty_excerpts_skipped: u32,
    pub generation_attempts: u32,
    pub generation_failures: u32,
    pub rate_limit_retries: u32,
    pub degraded_classifications: u32,
    pub records_added: u32,
    pub by_severity: [u32; 4], // Low, Medium, High, Unknown
}

impl RunStats {
    pub fn count_severity(&mut self, severity: Severity) {
        self.by_severity[severity as usize] += 1;
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Collection Run Complete ===")?;
        writeln!(f, "Queries issued:      {}", self.queries_issued)?;
        writeln!(f, "Results seen:        {}", self.results_seen)?;
        writeln!(f, "Duplicates skipped:  {}", self.duplicates_skipped)?;
        writeln!(f, "Empty excerpts:      {}", self.empty_excerpts_skipped)?;
        writeln!(f, "Generation attempts: {}", self.generation_attempts)?;
        writeln!(f, "Generation failures: {}", self.generation_failures)?;
        writeln!(f, "Rate-limit retries:  {}", self.rate_limit_retries)?;
        writeln!(f, "Degraded verdicts:   {}", self.degraded_classifications)?;
        writeln!(f, "Records added:       {}", self.records_added)?;
        writeln!(f, "\nBy severity:")?;
        writeln!(f, "  Low:     {}", self.by_severity[0])?;
        writeln!(f, "  Medium:  {}", self.by_severity[1])?;
        writeln!(f, "  High:    {}", self.by_severity[2])?;
        writeln!(f, "  Unknown: {}", self.by_severity[3])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_counters_index_by_variant() {
        let mut stats = RunStats::default();
        stats.count_severity(Severity::Low);
        stats.count_severity(Severity::High);
        stats.count_severity(Severity::High);
        stats.count_severity(Severity::Unknown);
        assert_eq!(stats.by_severity, [1, 0, 2, 1]);
    }
}
