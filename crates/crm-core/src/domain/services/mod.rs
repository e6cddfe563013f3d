//! Domain services module

use rust_decimal::Decimal;

/// Campaign performance math
///
/// Income is the sum of contract costs reachable through the campaign's
/// converted leads; the query layer assembles it, these functions only
/// combine it with the budget.
pub struct CampaignMetrics;

impl CampaignMetrics {
    /// Profit = income - budget, rounded to cents
    pub fn profit(total_income: Decimal, budget: Decimal) -> Decimal {
        (total_income - budget).round_dp(2)
    }

    /// ROI = income / budget, rounded to two places; 0 when there is no
    /// budget to divide by
    pub fn roi(total_income: Decimal, budget: Decimal) -> Decimal {
        if budget.is_zero() {
            return Decimal::ZERO;
        }
        (total_income / budget).round_dp(2)
    }
}
