use bingo_data::{ColorSample, PlayerProfile, Roster};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of matching an icon color against the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatch {
    pub name: String,
    /// Squared RGB distance to the matched reference color, lower is closer.
    pub distance: f64,
}

/// Nearest-color lookup over a fixed roster.
///
/// Matching is pure nearest-neighbor with no rejection cutoff: with a
/// non-empty roster there is always an answer. Callers that want an
/// "unknown player" bucket threshold the returned distance themselves.
/// Ties keep the earliest roster entry, so results are deterministic.
pub struct PlayerMatcher {
    profiles: Vec<PlayerProfile>,
}

impl PlayerMatcher {
    pub fn new(roster: Roster) -> Self {
        Self {
            profiles: roster.players().to_vec(),
        }
    }

    /// Closest roster profile to `sample`, or `None` on an empty roster.
    pub fn match_color(&self, sample: &ColorSample) -> Option<PlayerMatch> {
        let mut best: Option<(usize, f64)> = None;
        for (index, profile) in self.profiles.iter().enumerate() {
            let distance = profile.color.squared_distance(sample);
            if best.map_or(true, |(_, lowest)| distance < lowest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, distance)| {
            let name = self.profiles[index].name.clone();
            debug!("Closest profile: {} at squared distance {:.1}", name, distance);
            PlayerMatch { name, distance }
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
