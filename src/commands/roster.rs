use anyhow::{bail, Context, Result};
use bingo_data::{PlayerProfile, Roster};
use bingo_vision::{reference_sample, VisionConfig};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn run(dir: PathBuf, out: PathBuf) -> Result<()> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort(); // roster order independent of directory iteration

    let config = VisionConfig::default();
    let mut profiles = Vec::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("Skipping {} (unusable file name)", path.display());
            continue;
        };
        let opened = match image::open(&path) {
            Ok(opened) => opened,
            Err(err) => {
                warn!("Skipping {} (not a readable image: {})", path.display(), err);
                continue;
            }
        };
        let gray = opened.to_luma8();
        let rgb = opened.to_rgb8();
        match reference_sample(&gray, &rgb, &config) {
            Ok(color) => {
                info!("{}: icon color ({:.1}, {:.1}, {:.1})", name, color.r, color.g, color.b);
                profiles.push(PlayerProfile {
                    name: name.to_string(),
                    color,
                });
            }
            Err(err) => warn!("Skipping {}: {}", path.display(), err),
        }
    }

    if profiles.is_empty() {
        bail!("No usable reference images in {}", dir.display());
    }

    let roster = Roster::from_profiles(profiles);
    roster.save(&out)?;
    info!("Wrote {} profile(s) to {}", roster.len(), out.display());
    Ok(())
}
