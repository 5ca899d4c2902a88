//! Crop stage transition rule.

use crate::shared::*;

/// Advance a crop's stage according to simulated time `now`.
///
/// Each threshold compares TOTAL elapsed time since planting against that
/// stage's own duration constant — not time accumulated per stage. A crop
/// left alone indefinitely reaches Ready and stays there; there is no decay.
/// At most one stage transition happens per call, and stages never regress.
pub fn advance_stage(crop: &mut PlantedCrop, now: f64) {
    let elapsed = now - crop.planted_at;
    match crop.stage {
        CropStage::Seed if elapsed > crop.kind.seed_to_sprout_secs() => {
            crop.stage = CropStage::Sprout;
        }
        CropStage::Sprout if elapsed > crop.kind.sprout_to_ready_secs() => {
            crop.stage = CropStage::Ready;
        }
        _ => {}
    }
}

/// Seconds until this crop's next stage transition, or None if Ready.
/// Used by the presentation layer for the per-tile countdown labels.
pub fn secs_to_next_stage(crop: &PlantedCrop, now: f64) -> Option<f64> {
    let elapsed = now - crop.planted_at;
    let threshold = match crop.stage {
        CropStage::Seed => crop.kind.seed_to_sprout_secs(),
        CropStage::Sprout => crop.kind.sprout_to_ready_secs(),
        CropStage::Ready => return None,
    };
    Some((threshold - elapsed).max(0.0))
}
