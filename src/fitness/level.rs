use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanDay {
    pub day: &'static str,
    pub workout: &'static str,
}

const BEGINNER_PLAN: [PlanDay; 5] = [
    PlanDay { day: "Day 1", workout: "Jumping Jacks x 30 sec, Squats x 10, Push-ups x 5" },
    PlanDay { day: "Day 2", workout: "High Knees x 30 sec, Lunges x 10, Plank x 20 sec" },
    PlanDay { day: "Day 3", workout: "Mountain Climbers x 30 sec, Wall Sit x 20 sec, Crunches x 15" },
    PlanDay { day: "Day 4", workout: "Jogging in Place x 30 sec, Bridges x 10, Shoulder Taps x 10" },
    PlanDay { day: "Day 5", workout: "Burpees x 5, Side Lunges x 10, Plank x 30 sec" },
];

const INTERMEDIATE_PLAN: [PlanDay; 5] = [
    PlanDay { day: "Day 1", workout: "Jump Rope x 1 min, Squats x 20, Push-ups x 10" },
    PlanDay { day: "Day 2", workout: "Burpees x 10, Lunges x 15, Plank x 40 sec" },
    PlanDay { day: "Day 3", workout: "Mountain Climbers x 30 sec, Bicycle Crunches x 20, Wall Sit x 30 sec" },
    PlanDay { day: "Day 4", workout: "Jogging x 3 min, Box Jumps x 10, Plank Shoulder Taps x 15" },
    PlanDay { day: "Day 5", workout: "Jump Squats x 15, Bulgarian Split Squats x 10, Plank x 1 min" },
];

const ADVANCED_PLAN: [PlanDay; 5] = [
    PlanDay { day: "Day 1", workout: "Sprint x 2 min, Push-ups x 30, Squats x 30" },
    PlanDay { day: "Day 2", workout: "Burpees x 20, Pull-ups x 10, Hanging Leg Raises x 15" },
    PlanDay { day: "Day 3", workout: "Box Jumps x 20, Dead Hangs x 30 sec, Dips x 15" },
    PlanDay { day: "Day 4", workout: "Running x 5 min, Power Cleans x 10, Plank Hold x 2 min" },
    PlanDay { day: "Day 5", workout: "Jump Lunges x 20, Front Squats x 15, Push Press x 12" },
];

impl FitnessLevel {
    /// Falling short of any one minimum places the user in that band.
    pub fn assess(pushups: i64, squats: i64, plank_seconds: i64) -> Self {
        if pushups < 10 || squats < 10 || plank_seconds < 20 {
            FitnessLevel::Beginner
        } else if pushups < 20 || squats < 20 || plank_seconds < 40 {
            FitnessLevel::Intermediate
        } else {
            FitnessLevel::Advanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Beginner" => Some(FitnessLevel::Beginner),
            "Intermediate" => Some(FitnessLevel::Intermediate),
            "Advanced" => Some(FitnessLevel::Advanced),
            _ => None,
        }
    }

    pub fn plan(self) -> &'static [PlanDay] {
        match self {
            FitnessLevel::Beginner => &BEGINNER_PLAN,
            FitnessLevel::Intermediate => &INTERMEDIATE_PLAN,
            FitnessLevel::Advanced => &ADVANCED_PLAN,
        }
    }
}
