use crate::models::{Column, ColumnRoles};
use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Status value a case must carry, verbatim, to be counted.
pub const CERTIFIED: &str = "CERTIFIED";

/// Label -> occurrence count for one reporting dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uppercase `label` and count it once. Empty labels are ignored.
    pub fn increment(&mut self, label: &str) -> bool {
        if label.is_empty() {
            return false;
        }
        *self.counts.entry(label.to_uppercase()).or_insert(0) += 1;
        true
    }

    /// Count recorded for an already uppercased label, `0` when never seen.
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// No certified row contributed a label to this table.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

/// What the aggregator did with one data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Counted,
    Duplicate,
    NotCertified,
    Malformed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub rows: u64,
    pub counted: u64,
    pub duplicates: u64,
    pub not_certified: u64,
    pub malformed: u64,
}

impl RowStats {
    pub fn record(&mut self, outcome: RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::Counted => self.counted += 1,
            RowOutcome::Duplicate => self.duplicates += 1,
            RowOutcome::NotCertified => self.not_certified += 1,
            RowOutcome::Malformed => self.malformed += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub certified_total: u64,
    pub occupations: FrequencyTable,
    pub states: FrequencyTable,
    pub stats: RowStats,
}

pub struct VisaAggregator<'a> {
    roles: &'a ColumnRoles,
    seen_cases: HashSet<String>,
    result: Aggregation,
}

fn field<'r>(record: &'r StringRecord, column: &Column) -> Option<&'r str> {
    record.get(column.index)
}

impl<'a> VisaAggregator<'a> {
    pub fn new(roles: &'a ColumnRoles) -> Self {
        Self {
            roles,
            seen_cases: HashSet::new(),
            result: Aggregation::default(),
        }
    }

    /// Distinct certified cases counted so far.
    pub fn certified_total(&self) -> u64 {
        self.result.certified_total
    }

    /// Count one data row. Each case number contributes at most once, however many
    /// resubmission rows reference it.
    pub fn process_record(&mut self, record: &StringRecord) -> RowOutcome {
        let outcome = self.classify(record);
        self.result.stats.record(outcome);
        outcome
    }

    /// Account for a row the reader could not decode.
    pub fn skip_malformed(&mut self) {
        self.result.stats.record(RowOutcome::Malformed);
    }

    fn classify(&mut self, record: &StringRecord) -> RowOutcome {
        let case_id = match field(record, &self.roles.case_id) {
            Some(case_id) if !case_id.is_empty() => case_id,
            _ => {
                debug!(line = ?record.position().map(|p| p.line()), "row without case number");
                return RowOutcome::Malformed;
            }
        };
        let Some(status) = field(record, &self.roles.status) else {
            debug!(case_id, "row without status");
            return RowOutcome::Malformed;
        };

        if status != CERTIFIED {
            return RowOutcome::NotCertified;
        }
        if !self.seen_cases.insert(case_id.to_string()) {
            return RowOutcome::Duplicate;
        }
        self.result.certified_total += 1;

        let work_state = field(record, &self.roles.work_state).unwrap_or("");
        if !self.result.states.increment(work_state) {
            if let Some(employer_state) = &self.roles.employer_state {
                self.result
                    .states
                    .increment(field(record, employer_state).unwrap_or(""));
            }
        }
        self.result
            .occupations
            .increment(field(record, &self.roles.occupation).unwrap_or(""));

        RowOutcome::Counted
    }

    pub fn finish(self) -> Aggregation {
        debug_assert_eq!(self.result.certified_total, self.seen_cases.len() as u64);
        self.result
    }
}
