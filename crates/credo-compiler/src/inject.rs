// inject.rs — Hybrid-ownership injection: splice a generated region into a
// file that may also contain human-authored text.
//
// Pure text transformation, no file I/O — the orchestrator reads and
// writes; this module only computes new content. The managed region is the
// span from begin marker to end marker inclusive; everything outside it is
// caller-owned and copied through verbatim.

use thiserror::Error;

/// Sentinel opening the managed region of the primary artifact.
pub const BEGIN_MARKER: &str = "<!-- BEGIN-CREDO-POLICIES -->";
/// Sentinel closing the managed region.
pub const END_MARKER: &str = "<!-- END-CREDO-POLICIES -->";

/// Why a file's markers could not be used for splicing.
///
/// Every anomaly is handled the same way (append with fresh markers behind
/// the confirmation gate); the distinction exists so messages can name the
/// problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkerAnomaly {
    #[error("end marker present without a begin marker")]
    MissingBegin,
    #[error("begin marker present without an end marker")]
    MissingEnd,
    #[error("begin marker appears more than once")]
    DuplicateBegin,
    #[error("end marker appears more than once")]
    DuplicateEnd,
    #[error("end marker appears before the begin marker")]
    Reversed,
}

/// Classification of existing content with respect to the marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Neither marker present.
    Absent,
    /// Exactly one of each, begin before end. Byte offsets of the begin
    /// marker start and the end marker start.
    WellFormed { begin: usize, end: usize },
    Malformed(MarkerAnomaly),
}

/// Classify `content` against a marker pair.
pub fn classify_markers(content: &str, begin: &str, end: &str) -> MarkerState {
    let begins: Vec<usize> = content.match_indices(begin).map(|(i, _)| i).collect();
    let ends: Vec<usize> = content.match_indices(end).map(|(i, _)| i).collect();

    match (begins.len(), ends.len()) {
        (0, 0) => MarkerState::Absent,
        (0, _) => MarkerState::Malformed(MarkerAnomaly::MissingBegin),
        (_, 0) => MarkerState::Malformed(MarkerAnomaly::MissingEnd),
        (1, 1) if begins[0] < ends[0] => MarkerState::WellFormed {
            begin: begins[0],
            end: ends[0],
        },
        (1, 1) => MarkerState::Malformed(MarkerAnomaly::Reversed),
        (b, _) if b > 1 => MarkerState::Malformed(MarkerAnomaly::DuplicateBegin),
        _ => MarkerState::Malformed(MarkerAnomaly::DuplicateEnd),
    }
}

/// What the injection did to produce its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectAction {
    /// No existing file: emitted the full template.
    CreatedTemplate,
    /// Well-formed markers: replaced the managed region in place.
    ReplacedRegion,
    /// No usable markers: appended a fresh region after existing content.
    /// Gated behind confirmation unless the caller overrides.
    AppendedRegion(Option<MarkerAnomaly>),
}

/// Result of a pure injection: the would-be file content plus what
/// happened. No bytes touch disk here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectOutcome {
    pub content: String,
    pub action: InjectAction,
}

impl InjectOutcome {
    /// Whether the orchestrator must obtain confirmation before writing.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self.action, InjectAction::AppendedRegion(_))
    }
}

/// Inject `body` as the managed region of `existing`, with the standard
/// marker pair.
pub fn inject(existing: Option<&str>, body: &str) -> InjectOutcome {
    inject_region(existing, body, BEGIN_MARKER, END_MARKER)
}

/// Inject `body` as the managed region delimited by `begin` / `end`.
///
/// - No existing content → full template (placeholder header, region,
///   placeholder footer).
/// - Well-formed markers → splice: text before the begin marker and after
///   the end marker is preserved verbatim.
/// - Anything else → region appended after the existing content with fresh
///   markers; [`InjectOutcome::needs_confirmation`] is set.
///
/// Injecting the same body into already-managed content is a fixed point:
/// the second pass produces byte-identical output.
pub fn inject_region(existing: Option<&str>, body: &str, begin: &str, end: &str) -> InjectOutcome {
    let region = format!("{}\n{}\n{}", begin, body, end);

    let Some(existing) = existing else {
        return InjectOutcome {
            content: render_template(&region),
            action: InjectAction::CreatedTemplate,
        };
    };

    match classify_markers(existing, begin, end) {
        MarkerState::WellFormed {
            begin: begin_at,
            end: end_at,
        } => {
            let before = &existing[..begin_at];
            let after = &existing[end_at + end.len()..];
            InjectOutcome {
                content: format!("{}{}{}", before, region, after),
                action: InjectAction::ReplacedRegion,
            }
        }
        state => {
            let anomaly = match state {
                MarkerState::Malformed(anomaly) => {
                    tracing::warn!("existing managed region unusable: {}", anomaly);
                    Some(anomaly)
                }
                _ => None,
            };
            let mut content = existing.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push('\n');
            content.push_str(&region);
            content.push('\n');
            InjectOutcome {
                content,
                action: InjectAction::AppendedRegion(anomaly),
            }
        }
    }
}

fn render_template(region: &str) -> String {
    format!(
        "# AGENTS.md\n\n\
         ## Project Overview\n\n\
         _Describe your project, its setup commands, and its conventions\n\
         here. This section is yours; the compiler never touches it._\n\n\
         {}\n\n\
         <!-- Project-specific guidance below this line is preserved. -->\n",
        region
    )
}
