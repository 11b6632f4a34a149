//! Journey stage gating for progressively disclosed content.

use crate::{JourneyStage, VisibilityRule};

/// Why a rule hid a piece of content
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hidden {
    /// Stage not in the rule's allowed list
    Stage,
    /// Current week is before `min_week`
    TooEarly { min_week: u32 },
    /// Current week is after `max_week`
    TooLate { max_week: u32 },
}

/// Evaluate a rule, reporting the first failing constraint.
///
/// Checks run stage, then lower bound, then upper bound. Each constraint is
/// independent, so the order only decides which reason is reported.
pub fn evaluate(current_week: u32, stage: &JourneyStage, rule: &VisibilityRule) -> Result<(), Hidden> {
    if !rule.stages.is_empty() && !rule.stages.contains(stage) {
        return Err(Hidden::Stage);
    }

    if let Some(min_week) = rule.min_week {
        if current_week < min_week {
            return Err(Hidden::TooEarly { min_week });
        }
    }

    if let Some(max_week) = rule.max_week {
        if current_week > max_week {
            return Err(Hidden::TooLate { max_week });
        }
    }

    Ok(())
}

/// Whether content governed by `rule` is visible
pub fn should_show(current_week: u32, stage: &JourneyStage, rule: &VisibilityRule) -> bool {
    evaluate(current_week, stage, rule).is_ok()
}

/// Return `content` when visible, otherwise the fallback (if any)
pub fn gate<T>(
    current_week: u32,
    stage: &JourneyStage,
    rule: &VisibilityRule,
    content: T,
    fallback: Option<T>,
) -> Option<T> {
    if should_show(current_week, stage, rule) {
        Some(content)
    } else {
        fallback
    }
}

impl std::fmt::Display for Hidden {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hidden::Stage => write!(f, "not for this stage"),
            Hidden::TooEarly { min_week } => write!(f, "unlocks at week {}", min_week),
            Hidden::TooLate { max_week } => write!(f, "ended after week {}", max_week),
        }
    }
}
