//! Farm grid — fixed 7×7 field of crop cells.
//!
//! The grid owns cell occupancy and the growth tick. Seed stock and coin
//! movement live in the wallet; the session coordinates the two so that a
//! plant or harvest command touches both sides atomically.

pub mod growth;

use crate::shared::*;

/// Fixed N×N matrix of optional crops. Coordinates are (row, col) in
/// `[0, GRID_SIZE)`; callers are expected to stay in range.
#[derive(Debug, Clone)]
pub struct FarmGrid {
    cells: [[Option<PlantedCrop>; GRID_SIZE]; GRID_SIZE],
}

impl Default for FarmGrid {
    fn default() -> Self {
        Self {
            cells: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }
}

impl FarmGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<&PlantedCrop> {
        self.cells[row][col].as_ref()
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cells[row][col].is_none()
    }

    /// Place a new crop at Seed stage. Fails if the cell already holds one.
    /// Seed stock is the session's concern; this only manages the cell.
    pub fn plant(
        &mut self,
        row: usize,
        col: usize,
        kind: CropKind,
        now: f64,
    ) -> Result<(), CommandError> {
        if self.cells[row][col].is_some() {
            return Err(CommandError::OccupiedCell);
        }
        self.cells[row][col] = Some(PlantedCrop {
            kind,
            stage: CropStage::Seed,
            planted_at: now,
        });
        Ok(())
    }

    /// Remove a Ready crop and return its kind and harvest reward.
    /// The cell is empty afterwards; a second harvest fails with EmptyCell.
    pub fn harvest(&mut self, row: usize, col: usize) -> Result<(CropKind, u32), CommandError> {
        let crop = self.cells[row][col].ok_or(CommandError::EmptyCell)?;
        if crop.stage != CropStage::Ready {
            return Err(CommandError::NotReady);
        }
        self.cells[row][col] = None;
        Ok((crop.kind, crop.kind.harvest_reward()))
    }

    /// Run the stage-transition rule on every occupied cell.
    pub fn tick(&mut self, now: f64) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if let Some(crop) = cell {
                    growth::advance_stage(crop, now);
                }
            }
        }
    }

    /// Iterate occupied cells as (row, col, crop).
    pub fn iter_crops(&self) -> impl Iterator<Item = (usize, usize, &PlantedCrop)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_ref().map(|crop| (r, c, crop)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_rejects_occupied_cell() {
        let mut grid = FarmGrid::default();
        assert!(grid.plant(2, 3, CropKind::Corn, 0.0).is_ok());
        assert_eq!(
            grid.plant(2, 3, CropKind::Grape, 1.0),
            Err(CommandError::OccupiedCell)
        );
        assert_eq!(grid.get(2, 3).unwrap().kind, CropKind::Corn);
    }

    #[test]
    fn test_harvest_requires_ready_stage() {
        let mut grid = FarmGrid::default();
        grid.plant(0, 0, CropKind::Corn, 0.0).unwrap();
        assert_eq!(grid.harvest(0, 0), Err(CommandError::NotReady));

        // Grow past both thresholds (total elapsed > 8s, one stage per tick).
        grid.tick(8.5);
        grid.tick(9.0);
        assert_eq!(grid.harvest(0, 0), Ok((CropKind::Corn, 6)));
    }

    #[test]
    fn test_harvest_empties_cell_and_second_attempt_fails() {
        let mut grid = FarmGrid::default();
        grid.plant(6, 6, CropKind::Tomato, 0.0).unwrap();
        grid.tick(12.5);
        grid.tick(13.0);
        assert_eq!(grid.harvest(6, 6), Ok((CropKind::Tomato, 18)));
        assert!(grid.is_empty(6, 6));
        assert_eq!(grid.harvest(6, 6), Err(CommandError::EmptyCell));
    }

    #[test]
    fn test_harvest_empty_cell_fails() {
        let mut grid = FarmGrid::default();
        assert_eq!(grid.harvest(3, 3), Err(CommandError::EmptyCell));
    }

    #[test]
    fn test_tick_advances_every_occupied_cell() {
        let mut grid = FarmGrid::default();
        grid.plant(0, 0, CropKind::Corn, 0.0).unwrap();
        grid.plant(1, 1, CropKind::Super, 0.0).unwrap();
        grid.tick(8.5);
        assert_eq!(grid.get(0, 0).unwrap().stage, CropStage::Sprout);
        assert_eq!(grid.get(1, 1).unwrap().stage, CropStage::Seed, "super takes 20s");
        assert_eq!(grid.iter_crops().count(), 2);
    }
}
