use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Average RGB color of a profile icon, as floating-point channel means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorSample {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance to another sample. Lower is closer;
    /// the square root is never taken since only ordering matters.
    pub fn squared_distance(&self, other: &ColorSample) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

/// One known player: an opaque name plus the reference color of their icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub color: ColorSample,
}

/// Raw roster file format.
#[derive(Debug, Serialize, Deserialize)]
struct RosterFile {
    version: u32,
    players: Vec<PlayerProfile>,
}

const ROSTER_VERSION: u32 = 1;

/// Reference roster: an ordered list of player profiles with unique names.
///
/// Built once (from reference images or a saved file) and read-only
/// afterwards. Order is preserved so nearest-color ties resolve the same
/// way on every run.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<PlayerProfile>,
}

impl Roster {
    /// Build a roster from profiles, keeping the first entry for any
    /// duplicated name.
    pub fn from_profiles(profiles: Vec<PlayerProfile>) -> Self {
        let mut players: Vec<PlayerProfile> = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if players.iter().any(|p| p.name == profile.name) {
                tracing::warn!("Duplicate roster entry '{}' ignored", profile.name);
                continue;
            }
            players.push(profile);
        }
        Self { players }
    }

    /// Load a roster from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        let file: RosterFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;
        tracing::info!(
            "Loaded {} roster entr{} from {}",
            file.players.len(),
            if file.players.len() == 1 { "y" } else { "ies" },
            path.display()
        );
        Ok(Self::from_profiles(file.players))
    }

    /// Write the roster as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = RosterFile {
            version: ROSTER_VERSION,
            players: self.players.clone(),
        };
        let content =
            serde_json::to_string_pretty(&file).context("Failed to serialize roster")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write roster {}", path.display()))?;
        Ok(())
    }

    pub fn players(&self) -> &[PlayerProfile] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        let a = ColorSample::new(0.0, 0.0, 0.0);
        let b = ColorSample::new(10.0, 10.0, 10.0);
        assert_eq!(a.squared_distance(&b), 300.0);
        assert_eq!(b.squared_distance(&a), 300.0);
        assert_eq!(a.squared_distance(&a), 0.0);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let roster = Roster::from_profiles(vec![
            PlayerProfile {
                name: "vojto".into(),
                color: ColorSample::new(1.0, 2.0, 3.0),
            },
            PlayerProfile {
                name: "vojto".into(),
                color: ColorSample::new(9.0, 9.0, 9.0),
            },
        ]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].color.r, 1.0);
    }

    #[test]
    fn test_roster_json_round_trip() {
        let file = RosterFile {
            version: ROSTER_VERSION,
            players: vec![
                PlayerProfile {
                    name: "dart".into(),
                    color: ColorSample::new(90.25, 85.66, 84.56),
                },
                PlayerProfile {
                    name: "joy".into(),
                    color: ColorSample::new(210.97, 183.62, 181.04),
                },
            ],
        };
        let json = serde_json::to_string(&file).unwrap();
        let back: RosterFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, ROSTER_VERSION);
        assert_eq!(back.players.len(), 2);
        // Order must survive the round trip; matching depends on it.
        assert_eq!(back.players[0].name, "dart");
        assert_eq!(back.players[1].name, "joy");
        assert_eq!(back.players[1].color.b, 181.04);
    }

    #[test]
    fn test_load_nonexistent() {
        let err = Roster::load(Path::new("/nonexistent/roster.json")).unwrap_err();
        assert!(err.to_string().contains("roster"));
    }
}
