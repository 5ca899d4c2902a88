//! Economy — coin balance and seed inventory.
//!
//! The wallet's only mutators are guarded: `buy_seed` refuses overdrafts,
//! `debit` clamps at zero rather than wrapping. The paused-purchase rule is
//! enforced at the session command layer, which owns the clock.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Debug, Clone)]
pub struct Wallet {
    pub coins: u32,
    seeds: [u32; CropKind::COUNT],
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            seeds: [0; CropKind::COUNT],
        }
    }
}

impl Wallet {
    pub fn seed_count(&self, kind: CropKind) -> u32 {
        self.seeds[kind.index()]
    }

    pub fn total_seeds(&self) -> u32 {
        self.seeds.iter().sum()
    }

    /// Debit the seed cost and add one seed to inventory.
    pub fn buy_seed(&mut self, kind: CropKind) -> Result<(), CommandError> {
        let cost = kind.seed_cost();
        if self.coins < cost {
            return Err(CommandError::InsufficientFunds);
        }
        self.coins -= cost;
        self.seeds[kind.index()] += 1;
        Ok(())
    }

    /// Consume one seed of the given kind for planting.
    pub fn take_seed(&mut self, kind: CropKind) -> Result<(), CommandError> {
        let count = &mut self.seeds[kind.index()];
        if *count == 0 {
            return Err(CommandError::OutOfStock);
        }
        *count -= 1;
        Ok(())
    }

    /// The cheapest kind with at least one seed in stock, if any.
    /// Iterates the canonical cheap-to-expensive order.
    pub fn cheapest_in_stock(&self) -> Option<CropKind> {
        CropKind::ALL
            .into_iter()
            .find(|kind| self.seed_count(*kind) > 0)
    }

    pub fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Clamped debit. Normal play never reaches the clamp because buy_seed
    /// is the only spending path and it validates first.
    pub fn debit(&mut self, amount: u32) {
        if amount > self.coins {
            warn!(
                "[Economy] Tried to debit {} with only {} coins. Clamping to 0.",
                amount, self.coins
            );
            self.coins = 0;
        } else {
            self.coins -= amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_seed_debits_and_stocks() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.coins, 15);
        wallet.buy_seed(CropKind::Corn).unwrap();
        assert_eq!(wallet.coins, 10);
        assert_eq!(wallet.seed_count(CropKind::Corn), 1);
        assert_eq!(wallet.total_seeds(), 1);
    }

    #[test]
    fn test_buy_seed_rejects_overdraft() {
        let mut wallet = Wallet::default();
        assert_eq!(
            wallet.buy_seed(CropKind::Super),
            Err(CommandError::InsufficientFunds),
            "super seed costs 20, starting coins are 15"
        );
        assert_eq!(wallet.coins, 15);
        assert_eq!(wallet.seed_count(CropKind::Super), 0);
    }

    #[test]
    fn test_take_seed_requires_stock() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.take_seed(CropKind::Grape), Err(CommandError::OutOfStock));
        wallet.buy_seed(CropKind::Grape).unwrap();
        wallet.take_seed(CropKind::Grape).unwrap();
        assert_eq!(wallet.seed_count(CropKind::Grape), 0);
    }

    #[test]
    fn test_cheapest_in_stock_follows_canonical_order() {
        let mut wallet = Wallet::default();
        assert_eq!(wallet.cheapest_in_stock(), None);
        wallet.credit(100);
        wallet.buy_seed(CropKind::Tomato).unwrap();
        wallet.buy_seed(CropKind::Watermelon).unwrap();
        assert_eq!(wallet.cheapest_in_stock(), Some(CropKind::Watermelon));
    }

    #[test]
    fn test_debit_clamps_at_zero() {
        let mut wallet = Wallet::default();
        wallet.debit(999);
        assert_eq!(wallet.coins, 0);
    }
}
