//! Game clock: week/season/year plus the monotonic absolute-week index.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn index(self) -> u32 {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

/// Time constants the host must supply rather than the engine hard-coding,
/// per spec.md §6 ("implementation must read the constant, not hard-code").
#[derive(Debug, Clone)]
pub struct TimeConstants {
    pub weeks_per_season: u32,
}

impl Default for TimeConstants {
    fn default() -> Self {
        // Source value per spec.md §6.
        Self { weeks_per_season: 12 }
    }
}

pub const SEASON_ORDER: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

/// Week is 1-based; rolls to the next season at `weeks_per_season + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub week: u32,
    pub season: Season,
    pub year: u32,
}

impl GameClock {
    pub fn new(week: u32, season: Season, year: u32) -> Self {
        Self { week, season, year }
    }

    /// `W = (year*4 + seasonIndex) * weeks_per_season + (week - 1)`.
    pub fn absolute_week(&self, time: &TimeConstants) -> u64 {
        let seasons_elapsed = self.year as u64 * 4 + self.season.index() as u64;
        seasons_elapsed * time.weeks_per_season as u64 + (self.week as u64 - 1)
    }

    /// Advance by one week, returning the new clock plus whether the
    /// season and/or year rolled over. Mutation belongs solely to the
    /// tick orchestrator; this is a pure step function.
    pub fn advance(&self, time: &TimeConstants) -> AdvancedClock {
        let mut week = self.week + 1;
        let mut season = self.season;
        let mut year = self.year;
        let mut season_changed = false;
        let mut year_changed = false;

        if week > time.weeks_per_season {
            week = 1;
            season_changed = true;
            let next = season.next();
            if next == Season::Spring {
                year += 1;
                year_changed = true;
            }
            season = next;
        }

        AdvancedClock {
            clock: GameClock { week, season, year },
            season_changed,
            year_changed,
        }
    }
}

pub struct AdvancedClock {
    pub clock: GameClock,
    pub season_changed: bool,
    pub year_changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_within_season() {
        let time = TimeConstants::default();
        let clock = GameClock::new(5, Season::Spring, 2025);
        let adv = clock.advance(&time);
        assert_eq!(adv.clock, GameClock::new(6, Season::Spring, 2025));
        assert!(!adv.season_changed);
        assert!(!adv.year_changed);
    }

    #[test]
    fn season_boundary_without_year_rollover() {
        let time = TimeConstants::default();
        let clock = GameClock::new(12, Season::Fall, 2025);
        let adv = clock.advance(&time);
        assert_eq!(adv.clock, GameClock::new(1, Season::Winter, 2025));
        assert!(adv.season_changed);
        assert!(!adv.year_changed);
    }

    #[test]
    fn year_boundary_at_weeks_per_season() {
        let time = TimeConstants::default();
        let clock = GameClock::new(12, Season::Winter, 2025);
        let adv = clock.advance(&time);
        assert_eq!(adv.clock, GameClock::new(1, Season::Spring, 2026));
        assert!(adv.season_changed);
        assert!(adv.year_changed);
    }

    #[test]
    fn absolute_week_is_monotonic_across_rollover() {
        let time = TimeConstants::default();
        let before = GameClock::new(12, Season::Winter, 2025);
        let after = before.advance(&time).clock;
        assert_eq!(after.absolute_week(&time), before.absolute_week(&time) + 1);
    }
}
