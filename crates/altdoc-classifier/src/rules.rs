//! Rule tier: weighted keyword/phrase matching

use altdoc_domain::{DocumentType, Layout};
use regex::Regex;
use std::sync::LazyLock;

/// Per-type vocabulary. Phrases are matched case-insensitively with
/// flexible inter-word whitespace.
static VOCABULARY: LazyLock<Vec<(DocumentType, Vec<(Regex, &'static str)>)>> =
    LazyLock::new(|| {
        let phrase = |p: &str| {
            let pattern = p
                .split(' ')
                .collect::<Vec<_>>()
                .join(r"\s+");
            Regex::new(&format!(r"(?i){}", pattern)).unwrap()
        };
        vec![
            (
                DocumentType::CapitalCall,
                vec![
                    (phrase("capital call"), "capital call"),
                    (phrase("drawdown notice"), "drawdown notice"),
                    (phrase("call notice"), "call notice"),
                    (phrase("contribution request"), "contribution request"),
                ],
            ),
            (
                DocumentType::DistributionNotice,
                vec![
                    (phrase("distribution notice"), "distribution notice"),
                    (phrase("return of capital"), "return of capital"),
                    (phrase("dividend distribution"), "dividend distribution"),
                    (phrase("cash distribution"), "cash distribution"),
                ],
            ),
            (
                DocumentType::QuarterlyUpdate,
                vec![
                    (phrase("quarterly report"), "quarterly report"),
                    (phrase("quarterly update"), "quarterly update"),
                    (Regex::new(r"(?i)q[1-4]\s+report").unwrap(), "q[1-4] report"),
                    (phrase("quarterly statement"), "quarterly statement"),
                ],
            ),
            (
                DocumentType::ValuationReport,
                vec![
                    (phrase("valuation report"), "valuation report"),
                    (phrase("fair value"), "fair value"),
                    (phrase("portfolio valuation"), "portfolio valuation"),
                    (phrase("asset valuation"), "asset valuation"),
                ],
            ),
        ]
    });

/// A rule-tier candidate
#[derive(Debug, Clone)]
pub(crate) struct RuleCandidate {
    /// Best-scoring type
    pub doc_type: DocumentType,

    /// Normalized weighted hit score, capped at 1.0
    pub score: f64,

    /// Vocabulary phrases that matched, for evidence
    pub matched: Vec<&'static str>,

    /// Types that scored identically; the tie-break picked the
    /// lexically smallest identifier
    pub tied_with: Vec<DocumentType>,
}

/// Score all types against the text and return the best candidate
///
/// Each phrase hit contributes `hit_weight`; hits inside the title region
/// (the first `title_lines` lines of the layout) count `title_weight`
/// times. Scores cap at 1.0. Ties between types resolve to the lexically
/// smaller identifier and are reported rather than silently dropped.
pub(crate) fn best_candidate(
    text: &str,
    layout: &Layout,
    hit_weight: f64,
    title_weight: f64,
    title_lines: usize,
) -> Option<RuleCandidate> {
    let title: String = layout
        .lines()
        .take(title_lines)
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut best: Option<RuleCandidate> = None;

    // VOCABULARY is declared in lexical type order, so the first maximum
    // seen is the documented tie-break winner.
    for (doc_type, phrases) in VOCABULARY.iter() {
        let mut hits = 0usize;
        let mut title_hits = 0usize;
        let mut matched = Vec::new();

        for (pattern, label) in phrases {
            let count = pattern.find_iter(text).count();
            if count > 0 {
                hits += count;
                matched.push(*label);
            }
            title_hits += pattern.find_iter(&title).count();
        }

        if hits == 0 {
            continue;
        }

        let weighted = hits as f64 + (title_weight - 1.0) * title_hits as f64;
        let score = (weighted * hit_weight).min(1.0);

        match &mut best {
            None => {
                best = Some(RuleCandidate {
                    doc_type: *doc_type,
                    score,
                    matched,
                    tied_with: Vec::new(),
                });
            }
            Some(current) if score > current.score => {
                best = Some(RuleCandidate {
                    doc_type: *doc_type,
                    score,
                    matched,
                    tied_with: Vec::new(),
                });
            }
            Some(current) if score == current.score => {
                current.tied_with.push(*doc_type);
            }
            Some(_) => {}
        }
    }

    best
}
