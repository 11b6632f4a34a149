//! Built-in content library: chapters, weekly tips and checklists.
//!
//! Every entry carries a [`VisibilityRule`]; the gate decides which entries
//! a user sees for their current week and journey stage.

use crate::dates::{MAX_WEEK, MIN_WEEK};
use crate::gate::{self, Hidden};
use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default library - built once and reused across all operations
static DEFAULT_LIBRARY: Lazy<ContentLibrary> = Lazy::new(build_default_library);

/// Get a reference to the cached default library
pub fn get_default_library() -> &'static ContentLibrary {
    &DEFAULT_LIBRARY
}

fn item(id: &str, title: &str, kind: ContentKind, body: &str, rule: VisibilityRule) -> ContentItem {
    ContentItem {
        id: id.into(),
        title: title.into(),
        kind,
        body: body.into(),
        rule,
    }
}

/// Builds the default library.
///
/// Prefer [`get_default_library`] outside of tests.
pub fn build_default_library() -> ContentLibrary {
    use ContentKind::*;
    use JourneyStage::*;

    let items = vec![
        // ====================================================================
        // Chapters
        // ====================================================================
        item(
            "welcome",
            "Welcome to your journey",
            Chapter,
            "How the app tracks your weeks, what the dashboard shows, and how new chapters unlock as you go.",
            VisibilityRule::any(),
        ),
        item(
            "trying_to_conceive",
            "Preparing for pregnancy",
            Chapter,
            "Cycle tracking basics, folic acid, and when to talk to your doctor before conceiving.",
            VisibilityRule::any().stage(PreConception),
        ),
        item(
            "first_trimester",
            "The first trimester",
            Chapter,
            "Early changes, morning sickness, fatigue, and booking your first appointments.",
            VisibilityRule::any().weeks(1, 13).stage(Pregnant),
        ),
        item(
            "second_trimester",
            "The second trimester",
            Chapter,
            "Energy returns, the bump shows, and you may feel the first movements.",
            VisibilityRule::any().weeks(14, 26).stage(Pregnant),
        ),
        item(
            "third_trimester",
            "The third trimester",
            Chapter,
            "Growth, sleep, birth planning, and recognising the signs of labour.",
            VisibilityRule::any().weeks(27, 42).stage(Pregnant),
        ),
        item(
            "fourth_trimester",
            "The fourth trimester",
            Chapter,
            "Recovery after birth, feeding, sleep, and looking after your mental health.",
            VisibilityRule::any().stage(Postpartum),
        ),
        // ====================================================================
        // Tips
        // ====================================================================
        item(
            "prenatal_vitamins",
            "Start prenatal vitamins",
            Tip,
            "Folic acid matters most in the first twelve weeks.",
            VisibilityRule::any()
                .max_week(12)
                .stages([PreConception, Pregnant]),
        ),
        item(
            "dating_scan",
            "Your dating scan",
            Tip,
            "The first ultrasound confirms your due date, usually between weeks 8 and 14.",
            VisibilityRule::any().weeks(8, 14).stage(Pregnant),
        ),
        item(
            "anatomy_scan",
            "The anatomy scan",
            Tip,
            "A detailed mid-pregnancy ultrasound, typically between weeks 18 and 22.",
            VisibilityRule::any().weeks(18, 22).stage(Pregnant),
        ),
        item(
            "kick_counts",
            "Counting kicks",
            Tip,
            "Get to know your baby's pattern of movement and report any change.",
            VisibilityRule::any().weeks(28, 42).stage(Pregnant),
        ),
        item(
            "past_due_date",
            "Past your due date",
            Tip,
            "What to expect from monitoring and induction if baby is taking their time.",
            VisibilityRule::any().min_week(41).stage(Pregnant),
        ),
        // ====================================================================
        // Checklists
        // ====================================================================
        item(
            "glucose_test",
            "Glucose screening",
            Checklist,
            "Fasting instructions and what to bring to your glucose tolerance test.",
            VisibilityRule::any().weeks(24, 28).stage(Pregnant),
        ),
        item(
            "hospital_bag",
            "Pack your hospital bag",
            Checklist,
            "Documents, clothes for you and baby, chargers, snacks, and the car seat.",
            VisibilityRule::any().weeks(32, 40).stage(Pregnant),
        ),
    ];

    ContentLibrary { items }
}

/// A library entry paired with the reason it is hidden (if it is)
#[derive(Clone, Debug)]
pub struct Evaluated<'a> {
    pub item: &'a ContentItem,
    pub hidden: Option<Hidden>,
}

impl ContentLibrary {
    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Entries visible for the given week and stage, ordered by unlock week then id
    pub fn visible_for(&self, week: u32, stage: &JourneyStage) -> Vec<&ContentItem> {
        let mut visible: Vec<&ContentItem> = self
            .items
            .iter()
            .filter(|item| gate::should_show(week, stage, &item.rule))
            .collect();
        sort_by_unlock(&mut visible);

        tracing::debug!(
            "{} of {} entries visible at week {} ({})",
            visible.len(),
            self.items.len(),
            week,
            stage
        );
        visible
    }

    /// Every entry with its visibility verdict, in the same order as `visible_for`
    pub fn evaluate_all(&self, week: u32, stage: &JourneyStage) -> Vec<Evaluated<'_>> {
        let mut items: Vec<&ContentItem> = self.items.iter().collect();
        sort_by_unlock(&mut items);

        items
            .into_iter()
            .map(|item| Evaluated {
                item,
                hidden: gate::evaluate(week, stage, &item.rule).err(),
            })
            .collect()
    }

    /// Validate the library for internal consistency
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                errors.push(format!("Duplicate content id '{}'", item.id));
            }

            if item.title.trim().is_empty() {
                errors.push(format!("Content '{}' has an empty title", item.id));
            }

            let rule = &item.rule;
            for bound in [rule.min_week, rule.max_week].into_iter().flatten() {
                if !(MIN_WEEK..=MAX_WEEK).contains(&bound) {
                    errors.push(format!(
                        "Content '{}' has week bound {} outside {}..={}",
                        item.id, bound, MIN_WEEK, MAX_WEEK
                    ));
                }
            }

            if let (Some(min), Some(max)) = (rule.min_week, rule.max_week) {
                if min > max {
                    errors.push(format!(
                        "Content '{}' has min_week {} after max_week {}",
                        item.id, min, max
                    ));
                }
            }
        }

        // Every week of a pregnancy should show something
        let pregnant = JourneyStage::Pregnant;
        for week in MIN_WEEK..=MAX_WEEK {
            let covered = self
                .items
                .iter()
                .any(|item| gate::should_show(week, &pregnant, &item.rule));
            if !covered {
                errors.push(format!("No content visible to a pregnant user at week {}", week));
            }
        }

        errors
    }
}

fn sort_by_unlock(items: &mut [&ContentItem]) {
    items.sort_by(|a, b| {
        a.rule
            .min_week
            .unwrap_or(0)
            .cmp(&b.rule.min_week.unwrap_or(0))
            .then_with(|| a.id.cmp(&b.id))
    });
}
