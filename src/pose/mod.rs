//! Pose catalog: exercise identity to skeleton kinematics.
//!
//! Resolution walks an ordered table of `(Match, generator)` rules and the
//! first matching rule wins. Rules naming a specific substring come before
//! broader ones, and muscle-group-only rules come last within their region,
//! so table order is the tie-breaker between overlapping predicates.
//! Exercises no rule claims fall back to `fallback_pose` for their group.

mod abs;
mod arms;
mod back;
mod chest;
mod legs;
mod shoulders;

use crate::exercise::{ExerciseDescriptor, MuscleGroup, ViewMode};
use crate::skeleton::Skeleton;

/// Predicate over an exercise descriptor
#[derive(Debug, Clone, Copy)]
pub enum Match {
    /// Lowercase substring of the exercise name
    Name(&'static str),
    /// Exact muscle group
    Muscle(MuscleGroup),
    /// Every inner predicate holds
    All(&'static [Match]),
    /// At least one inner predicate holds
    Any(&'static [Match]),
}

impl Match {
    pub fn matches(&self, exercise: &ExerciseDescriptor) -> bool {
        match self {
            Match::Name(needle) => exercise.name_contains(needle),
            Match::Muscle(muscle) => exercise.muscle == *muscle,
            Match::All(inner) => inner.iter().all(|m| m.matches(exercise)),
            Match::Any(inner) => inner.iter().any(|m| m.matches(exercise)),
        }
    }
}

/// Skeleton generator for one exercise family
pub type PoseFn = fn(ViewMode, f32) -> Skeleton;

/// One entry of the ordered rule table
#[derive(Debug, Clone, Copy)]
pub struct PoseRule {
    /// Stable identifier used in logs and tests
    pub id: &'static str,
    pub when: Match,
    pub generate: PoseFn,
}

/// Ordered rule table. First match wins.
pub static POSE_RULES: &[PoseRule] = &[
    // Chest
    PoseRule {
        id: "incline-bench",
        when: Match::Name("incline bench"),
        generate: chest::incline_bench,
    },
    PoseRule {
        id: "decline-press",
        when: Match::Name("decline press"),
        generate: chest::decline_press,
    },
    PoseRule {
        id: "flat-bench",
        when: Match::Any(&[
            Match::Name("flat bench"),
            Match::All(&[Match::Name("press"), Match::Muscle(MuscleGroup::Chest)]),
        ]),
        generate: chest::flat_bench,
    },
    PoseRule {
        id: "fly",
        when: Match::Any(&[Match::Name("fly"), Match::Name("pec deck")]),
        generate: chest::fly,
    },
    PoseRule {
        id: "push-up",
        when: Match::Name("push up"),
        generate: chest::push_up,
    },
    // Back
    PoseRule {
        id: "pull-up",
        when: Match::Name("pull up"),
        generate: back::pull_up,
    },
    PoseRule {
        id: "pulldown",
        when: Match::Name("pulldown"),
        generate: back::pulldown,
    },
    PoseRule {
        id: "hip-hinge",
        when: Match::Any(&[Match::Name("deadlift"), Match::Name("good morning")]),
        generate: back::hip_hinge,
    },
    PoseRule {
        id: "row",
        when: Match::Name("row"),
        generate: back::row,
    },
    // Biceps
    PoseRule {
        id: "preacher-curl",
        when: Match::Name("preacher curl"),
        generate: arms::preacher_curl,
    },
    PoseRule {
        id: "barbell-curl",
        when: Match::All(&[Match::Muscle(MuscleGroup::Biceps), Match::Name("barbell")]),
        generate: arms::barbell_curl,
    },
    PoseRule {
        id: "biceps",
        when: Match::Muscle(MuscleGroup::Biceps),
        generate: arms::dumbbell_curl,
    },
    // Triceps
    PoseRule {
        id: "lying-extension",
        when: Match::Any(&[Match::Name("skullcrusher"), Match::Name("overhead extension")]),
        generate: arms::lying_extension,
    },
    PoseRule {
        id: "dip",
        when: Match::Name("dip"),
        generate: arms::dip,
    },
    PoseRule {
        id: "pushdown",
        when: Match::Any(&[Match::Name("pushdown"), Match::Muscle(MuscleGroup::Triceps)]),
        generate: arms::pushdown,
    },
    // Shoulders
    PoseRule {
        id: "lateral-raise",
        when: Match::All(&[Match::Name("raise"), Match::Name("lateral")]),
        generate: shoulders::lateral_raise,
    },
    PoseRule {
        id: "front-raise",
        when: Match::All(&[Match::Name("raise"), Match::Name("front")]),
        generate: shoulders::front_raise,
    },
    PoseRule {
        id: "overhead-press",
        when: Match::All(&[Match::Name("press"), Match::Muscle(MuscleGroup::Shoulders)]),
        generate: shoulders::overhead_press,
    },
    // Legs
    PoseRule {
        id: "squat",
        when: Match::Name("squat"),
        generate: legs::squat,
    },
    PoseRule {
        id: "leg-press",
        when: Match::Name("leg press"),
        generate: legs::leg_press,
    },
    PoseRule {
        id: "lunge",
        when: Match::Any(&[Match::Name("lunge"), Match::Name("split squat")]),
        generate: legs::lunge,
    },
    PoseRule {
        id: "legs",
        when: Match::Muscle(MuscleGroup::Legs),
        generate: legs::leg_machine,
    },
    // Abs
    PoseRule {
        id: "plank",
        when: Match::Name("plank"),
        generate: abs::plank,
    },
    PoseRule {
        id: "leg-raise",
        when: Match::Name("leg raise"),
        generate: abs::leg_raise,
    },
    PoseRule {
        id: "abs",
        when: Match::Muscle(MuscleGroup::Abs),
        generate: abs::crunch,
    },
];

/// Find the first rule matching the exercise
pub fn resolve_rule(exercise: &ExerciseDescriptor) -> Option<&'static PoseRule> {
    POSE_RULES.iter().find(|rule| rule.when.matches(exercise))
}

/// Generic pose for a muscle group when no rule claims the exercise.
///
/// Groups with a muscle-only rule in the table never reach this; the rest
/// hold the standing base pose.
pub fn fallback_pose(_muscle: MuscleGroup, view: ViewMode, _rep: f32) -> Skeleton {
    Skeleton::base(view)
}

/// Generate the skeleton for one instant of a repetition.
///
/// Total: any descriptor yields a skeleton. `rep` is clamped to `[0, 1]`.
pub fn generate_pose(exercise: &ExerciseDescriptor, view: ViewMode, rep: f32) -> Skeleton {
    let rep = if rep.is_nan() { 0.0 } else { rep.clamp(0.0, 1.0) };
    match resolve_rule(exercise) {
        Some(rule) => (rule.generate)(view, rep),
        None => fallback_pose(exercise.muscle, view, rep),
    }
}
