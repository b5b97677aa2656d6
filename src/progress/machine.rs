//! Workout streak state machine.
//!
//! The streak counter lives in `0..CYCLE_DAYS` at rest. Each completed
//! workout moves it forward one day; landing exactly on a threshold day
//! awards that day's badge, and the last threshold closes the cycle by
//! resetting the counter to zero.

use serde::{Deserialize, Serialize};

use crate::achievements::NewAchievement;

pub const CYCLE_DAYS: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    Beginner,
    Intermediate,
    Advanced,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Beginner => "Beginner Badge",
            Badge::Intermediate => "Intermediate Badge",
            Badge::Advanced => "Advanced Badge",
        }
    }
}

struct Threshold {
    day: i32,
    badge: Badge,
    resets: bool,
}

/// Matched by exact equality on the post-increment day.
const THRESHOLDS: [Threshold; 3] = [
    Threshold { day: 3, badge: Badge::Beginner, resets: false },
    Threshold { day: 5, badge: Badge::Intermediate, resets: false },
    Threshold { day: CYCLE_DAYS, badge: Badge::Advanced, resets: true },
];

/// Outcome of one completed workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Streak length reached by this workout, before any reset.
    pub streak: i32,
    /// Value to persist.
    pub completed_days: i32,
    pub badge: Option<Badge>,
}

impl Step {
    /// The cycle just completed.
    pub fn redirect(&self) -> bool {
        self.completed_days == 0
    }

    pub fn achievement(&self) -> Option<NewAchievement> {
        self.badge.map(|badge| NewAchievement {
            title: badge.label().to_string(),
            description: format!(
                "Congratulations! You've earned the {} for completing {} workout days!",
                badge.label(),
                self.streak
            ),
        })
    }
}

/// Transition for one completed workout starting from `completed_days`.
/// Out-of-range stored values are clamped into the cycle first.
pub fn advance(completed_days: i32) -> Step {
    let streak = completed_days.clamp(0, CYCLE_DAYS - 1) + 1;
    match THRESHOLDS.iter().find(|t| t.day == streak) {
        Some(t) => Step {
            streak,
            completed_days: if t.resets { 0 } else { streak },
            badge: Some(t.badge),
        },
        None => Step {
            streak,
            completed_days: streak,
            badge: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(workouts: usize) -> Vec<Step> {
        let mut days = 0;
        (0..workouts)
            .map(|_| {
                let step = advance(days);
                days = step.completed_days;
                step
            })
            .collect()
    }

    #[test]
    fn first_two_workouts_award_nothing() {
        let steps = run(2);
        assert_eq!(steps[0].completed_days, 1);
        assert_eq!(steps[1].completed_days, 2);
        assert!(steps.iter().all(|s| s.badge.is_none()));
    }

    #[test]
    fn third_workout_awards_beginner() {
        let step = run(3)[2];
        assert_eq!(step.badge, Some(Badge::Beginner));
        assert_eq!(step.completed_days, 3);
        assert!(!step.redirect());
    }

    #[test]
    fn fifth_workout_awards_intermediate() {
        let steps = run(6);
        assert_eq!(steps[3].badge, None);
        assert_eq!(steps[4].badge, Some(Badge::Intermediate));
        assert_eq!(steps[5].badge, None);
    }

    #[test]
    fn seventh_workout_awards_advanced_and_resets() {
        let step = run(7)[6];
        assert_eq!(step.badge, Some(Badge::Advanced));
        assert_eq!(step.completed_days, 0);
        assert_eq!(step.streak, 7);
        assert!(step.redirect());
    }

    #[test]
    fn cycle_repeats_after_reset() {
        let steps = run(10);
        assert_eq!(steps[7].completed_days, 1);
        assert_eq!(steps[9].badge, Some(Badge::Beginner));
    }

    #[test]
    fn achievement_reports_pre_reset_streak() {
        let achievement = advance(6).achievement().expect("advanced badge");
        assert_eq!(achievement.title, "Advanced Badge");
        assert!(achievement.description.contains("7 workout days"));
        assert!(advance(0).achievement().is_none());
    }

    #[test]
    fn corrupt_counter_is_clamped() {
        assert_eq!(advance(-4).completed_days, 1);
        assert_eq!(advance(42).badge, Some(Badge::Advanced));
    }
}
