//! Paywall modal
//!
//! Shown when a locked episode is selected. It compares the unlock cost with
//! the balance and either offers a confirm action or the coin packages.
//! It never touches the balance itself.

use crossterm::event::{KeyCode, KeyEvent};

use crate::catalog::{COIN_PACKAGES, UNLOCK_COST};
use crate::models::CoinPackage;

/// What the modal asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaywallIntent {
    /// Deduct and unlock (only emitted when affordable)
    Confirm,
    /// Dismiss without side effects
    Close,
    /// Package picked; no payment collaborator exists yet
    ChoosePackage(usize),
}

/// Modal local state
#[derive(Debug, Clone)]
pub struct Paywall {
    pub cost: u32,
    pub packages: &'static [CoinPackage],
    /// Highlighted package when the balance is short
    pub package_cursor: usize,
}

impl Default for Paywall {
    fn default() -> Self {
        Self {
            cost: UNLOCK_COST,
            packages: COIN_PACKAGES,
            package_cursor: 0,
        }
    }
}

impl Paywall {
    pub fn can_afford(&self, balance: u32) -> bool {
        balance >= self.cost
    }

    /// Coins still missing to afford the unlock
    pub fn shortfall(&self, balance: u32) -> u32 {
        self.cost.saturating_sub(balance)
    }

    pub fn selected_package(&self) -> Option<&CoinPackage> {
        self.packages.get(self.package_cursor)
    }

    pub fn reset(&mut self) {
        self.package_cursor = 0;
    }

    /// Handle a key while the modal is open
    pub fn handle_key(&mut self, key: KeyEvent, balance: u32) -> Option<PaywallIntent> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => Some(PaywallIntent::Close),
            KeyCode::Enter | KeyCode::Char('y') if self.can_afford(balance) => {
                Some(PaywallIntent::Confirm)
            }
            KeyCode::Enter => Some(PaywallIntent::ChoosePackage(self.package_cursor)),
            KeyCode::Up | KeyCode::Char('k') if !self.can_afford(balance) => {
                self.package_cursor = self.package_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') if !self.can_afford(balance) => {
                if self.package_cursor + 1 < self.packages.len() {
                    self.package_cursor += 1;
                }
                None
            }
            _ => None,
        }
    }
}
