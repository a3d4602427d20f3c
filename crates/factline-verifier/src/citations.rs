//! Consistency between explanation markers and cited sources
//!
//! Every `{{n}}` marker should have exactly one `citedSources` entry and every
//! entry should be referenced at least once. Violations are reported, never
//! fatal; the assembler repairs what it can.

use crate::types::VerificationResult;
use factline_domain::citation::referenced_numbers;
use std::collections::BTreeSet;
use std::fmt;

/// One citation integrity problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationIssue {
    /// `{{n}}` appears in the explanation but no cited source has number `n`
    DanglingMarker(u32),
    /// A cited source is never referenced in the explanation
    OrphanCitation(u32),
    /// More than one cited source has the same number
    DuplicateCitation(u32),
    /// A cited source number is not in the retrieved evidence set
    UnknownSource(u32),
}

impl fmt::Display for CitationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationIssue::DanglingMarker(n) => write!(f, "marker {{{{{}}}}} has no cited source", n),
            CitationIssue::OrphanCitation(n) => write!(f, "source {} is cited but never referenced", n),
            CitationIssue::DuplicateCitation(n) => write!(f, "source {} is cited more than once", n),
            CitationIssue::UnknownSource(n) => write!(f, "source {} is not in the evidence set", n),
        }
    }
}

/// Check a verdict's citations against its explanation and the evidence set size
///
/// Source numbers are 1-based, so an evidence set of `evidence_len` sources
/// covers `1..=evidence_len`.
pub fn check_citations(result: &VerificationResult, evidence_len: usize) -> Vec<CitationIssue> {
    let referenced = referenced_numbers(&result.explanation);
    let mut cited = BTreeSet::new();
    let mut issues = Vec::new();

    for source in &result.cited_sources {
        let n = source.source_number;
        if !cited.insert(n) {
            issues.push(CitationIssue::DuplicateCitation(n));
            continue;
        }
        if n as usize > evidence_len {
            issues.push(CitationIssue::UnknownSource(n));
        }
        if !referenced.contains(&n) {
            issues.push(CitationIssue::OrphanCitation(n));
        }
    }

    issues.extend(
        referenced
            .into_iter()
            .filter(|n| !cited.contains(n))
            .map(CitationIssue::DanglingMarker),
    );
    issues
}
