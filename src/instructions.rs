//! Instruction catalog: coaching text for each demo phase.
//!
//! Resolution mirrors the pose catalog: an ordered table of predicates where
//! the first match wins, with a generic fallback phrased from the muscle group.

use serde::Serialize;
use std::borrow::Cow;

use crate::demo::DemoPhase;
use crate::exercise::{ExerciseDescriptor, MuscleGroup};
use crate::pose::Match;

/// Coaching text for the three demo phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructions {
    pub setup: Cow<'static, str>,
    pub front: Cow<'static, str>,
    pub side: Cow<'static, str>,
}

impl Instructions {
    /// Text shown while the demo is in `phase`
    pub fn for_phase(&self, phase: DemoPhase) -> &str {
        match phase {
            DemoPhase::Setup => &self.setup,
            DemoPhase::Front => &self.front,
            DemoPhase::Side => &self.side,
        }
    }
}

struct InstructionRule {
    when: Match,
    setup: &'static str,
    front: &'static str,
    side: &'static str,
}

static INSTRUCTION_RULES: &[InstructionRule] = &[
    InstructionRule {
        when: Match::Name("incline bench"),
        setup: "Wrap thumbs securely. Adjust bench to 30-45 degrees.",
        front: "Lower the bar to the upper chest. Keep forearms vertical.",
        side: "Press upward and slightly back over your collarbone.",
    },
    InstructionRule {
        when: Match::Name("decline press"),
        setup: "Lock feet tightly into the bench pads.",
        front: "Bring the bar down to the lower chest level evenly.",
        side: "Press straight up vertically, avoiding pushing towards feet.",
    },
    InstructionRule {
        when: Match::Any(&[Match::Name("flat bench"), Match::Name("spoto")]),
        setup: "Standard barbell grip. Retract scapula into the bench.",
        front: "Lower bar to mid-chest. Do not flare elbows out fully.",
        side: "Maintain a slight arch in the lower back. Keep glutes planted.",
    },
    InstructionRule {
        when: Match::Any(&[Match::Name("fly"), Match::Name("pec deck")]),
        setup: "Grip handles firmly. Maintain a slight bend in the elbows.",
        front: "Bring hands together in a wide arc, squeezing the chest at peak.",
        side: "Keep chest up and avoid pushing shoulders forward during the sweep.",
    },
    InstructionRule {
        when: Match::Name("push up"),
        setup: "Place hands flat on the floor, slightly wider than shoulder-width.",
        front: "Keep elbows tucked at a 45-degree angle from your torso.",
        side: "Maintain a perfectly straight line from your head to your heels.",
    },
    InstructionRule {
        when: Match::Name("pull up"),
        setup: "Use a wide overhand grip on the bar.",
        front: "Pull your elbows down and back, lifting your chest to the bar.",
        side: "Keep your torso slightly angled back, avoiding swinging.",
    },
    InstructionRule {
        when: Match::Name("pulldown"),
        setup: "Grip the wide bar slightly outside shoulder width.",
        front: "Pull the bar down to your upper chest, squeezing the lats.",
        side: "Lean back slightly and keep your torso rigid.",
    },
    InstructionRule {
        when: Match::Name("deadlift"),
        setup: "Double overhand or mixed grip on the barbell.",
        front: "Keep your chest tall and core braced throughout the movement.",
        side: "Hinge at the hips. Keep the bar path completely vertical and close to legs.",
    },
    InstructionRule {
        when: Match::Name("row"),
        setup: "Grip the bar slightly wider than shoulder-width.",
        front: "Pull the weight toward your belly button, keeping elbows tight.",
        side: "Keep your back straight, almost parallel to the floor.",
    },
    InstructionRule {
        when: Match::Name("preacher"),
        setup: "Grab the EZ bar. Rest triceps flat against the pad.",
        front: "Curl the weight up evenly without lifting elbows off the pad.",
        side: "Do not hyperextend the elbow at the bottom of the movement.",
    },
    InstructionRule {
        when: Match::Name("curl"),
        setup: "Underhand grip, wrists straight and locked.",
        front: "Keep elbows pinned to your sides. Squeeze biceps at the top.",
        side: "Do not use momentum from your back to swing the weight up.",
    },
    InstructionRule {
        when: Match::Name("skullcrusher"),
        setup: "Narrow grip on the EZ curl bar.",
        front: "Keep elbows tucked in, pointing straight up towards the ceiling.",
        side: "Lower the bar towards your forehead, extending only at the elbows.",
    },
    InstructionRule {
        when: Match::Name("dip"),
        setup: "Grip the parallel bars firmly.",
        front: "Lower yourself until your shoulders are below your elbows.",
        side: "Lean forward slightly to target chest, or stay upright for triceps.",
    },
    InstructionRule {
        when: Match::Name("pushdown"),
        setup: "Grip the cable attachment firmly at chest height.",
        front: "Keep elbows locked at your sides. Push straight down.",
        side: "Do not let the cable pull your elbows forward on the way up.",
    },
    InstructionRule {
        when: Match::Name("lateral raise"),
        setup: "Hold dumbbells with a neutral grip by your sides.",
        front: "Raise arms out to the side until parallel with the floor.",
        side: "Keep a slight bend in the elbow and avoid swinging the torso.",
    },
    InstructionRule {
        when: Match::All(&[Match::Name("press"), Match::Muscle(MuscleGroup::Shoulders)]),
        setup: "Grip dumbbells at shoulder height, palms facing forward.",
        front: "Press the weight overhead until arms are fully extended.",
        side: "Do not lean back excessively; keep the core tight.",
    },
    InstructionRule {
        when: Match::Name("squat"),
        setup: "Secure the bar on your upper back/traps, not your neck.",
        front: "Push knees outward, tracking over your toes. Do not let them cave in.",
        side: "Hinge hips back and drop down until thighs are parallel to the floor.",
    },
    InstructionRule {
        when: Match::Name("leg press"),
        setup: "Sit deeply into the machine pad. Grip side handles.",
        front: "Ensure knees track straight and don't buckle inward.",
        side: "Lower the sled until your knees are at a 90-degree angle. Do not lock knees out.",
    },
    InstructionRule {
        when: Match::Name("lunge"),
        setup: "Hold dumbbells securely by your sides.",
        front: "Keep your chest up and ensure the front knee does not collapse inward.",
        side: "Drop the back knee straight down toward the floor.",
    },
    InstructionRule {
        when: Match::Name("plank"),
        setup: "Forearms flat on the floor, elbows directly under shoulders.",
        front: "Keep shoulders completely level and stable.",
        side: "Brace your core tightly. Hips should not sag or pike up.",
    },
    InstructionRule {
        when: Match::Name("leg raise"),
        setup: "Hold onto a bench behind your head for stability.",
        front: "Keep legs straight and pressed together tightly.",
        side: "Press lower back into the floor. Raise legs to 90 degrees.",
    },
];

const FALLBACK_SETUP: &str = "Establish a firm, comfortable grip on the equipment.";
const FALLBACK_SIDE: &str =
    "Maintain a neutral spine and control the weight throughout the entire rep.";

/// Generic coaching text for exercises no rule claims
pub fn fallback_instructions(muscle: MuscleGroup) -> Instructions {
    Instructions {
        setup: Cow::Borrowed(FALLBACK_SETUP),
        front: Cow::Owned(format!("Ensure symmetrical movement activating the {}.", muscle)),
        side: Cow::Borrowed(FALLBACK_SIDE),
    }
}

/// Coaching text for an exercise. Total: unknown exercises get the fallback.
pub fn generate_instructions(exercise: &ExerciseDescriptor) -> Instructions {
    INSTRUCTION_RULES
        .iter()
        .find(|rule| rule.when.matches(exercise))
        .map(|rule| Instructions {
            setup: Cow::Borrowed(rule.setup),
            front: Cow::Borrowed(rule.front),
            side: Cow::Borrowed(rule.side),
        })
        .unwrap_or_else(|| fallback_instructions(exercise.muscle))
}
