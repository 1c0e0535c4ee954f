//! Savings recommendation from all-time income and expense totals

use rust_decimal::Decimal;

use crate::models::{PercentOfIncome, Transaction, Tip, DEFAULT_SAVE_RATE};

/// All-time inflow and outflow sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    /// Sum of positive amounts
    pub income: Decimal,
    /// Sum of negative amounts (itself negative or zero)
    pub expense: Decimal,
}

impl LedgerTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Self::default(), |mut totals, tx| {
                if tx.is_income() {
                    totals.income += tx.amount;
                } else if tx.is_expense() {
                    totals.expense += tx.amount;
                }
                totals
            })
    }
}

/// Builds the savings tip
#[derive(Debug, Clone, Copy)]
pub struct RecommendationGenerator {
    save_rate: f64,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationGenerator {
    pub fn new() -> Self {
        Self {
            save_rate: DEFAULT_SAVE_RATE,
        }
    }

    /// Percent-of-income tip over the user's full history
    pub fn percent_of_income(&self, transactions: &[Transaction]) -> Tip {
        let totals = LedgerTotals::from_transactions(transactions);
        Tip::PercentOfIncome(PercentOfIncome {
            save_rate: self.save_rate,
            income: render(totals.income),
            expense: render(totals.expense),
        })
    }
}

/// Plain decimal string without trailing zeros, `"0"` for zero
fn render(value: Decimal) -> String {
    value.normalize().to_string()
}
