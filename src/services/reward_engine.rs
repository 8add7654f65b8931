// src/services/reward_engine.rs

use rust_decimal::Decimal;

use crate::models::{
    goals::{Goal, RewardMode},
    rewards::{CommissionRates, RewardBand},
};

/// Cálculo de remuneração a partir de meta e total vendido.
/// Sem estado mutável nem I/O: pode ser chamado de qualquer lugar.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardEngine {
    rates: CommissionRates,
}

impl RewardEngine {
    pub fn new(rates: CommissionRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> CommissionRates {
        self.rates
    }

    pub fn compute_reward(&self, goal: &Goal, total_sales: Decimal, bands: Option<&[RewardBand]>) -> Decimal {
        match goal.reward_mode {
            RewardMode::Commission => self.commission(goal.target_amount, total_sales),
            RewardMode::BonusTier => {
                let percent = percent_achieved(total_sales, goal.target_amount);
                bands
                    .and_then(|bands| select_band(bands, percent))
                    .map(|band| band.bonus_amount)
                    .unwrap_or(Decimal::ZERO)
            }
        }
    }

    /// Meta não positiva é degenerada e sempre paga a taxa abaixo da meta.
    pub fn commission(&self, target_amount: Decimal, total_sales: Decimal) -> Decimal {
        let rate = if target_amount > Decimal::ZERO && total_sales >= target_amount {
            self.rates.at_or_above_goal
        } else {
            self.rates.below_goal
        };
        total_sales.checked_mul(rate).unwrap_or(Decimal::ZERO)
    }
}

/// Percentual da meta atingido. Meta <= 0 (ou estouro numérico) resulta em 0.
pub fn percent_achieved(total_sales: Decimal, target_amount: Decimal) -> Decimal {
    if target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_sales
        .checked_div(target_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Busca por piso: a faixa de maior percentual <= `percent`. Não interpola.
/// Entre faixas com o mesmo percentual vence a que aparece por último.
pub fn select_band(bands: &[RewardBand], percent: Decimal) -> Option<&RewardBand> {
    bands
        .iter()
        .filter(|band| band.threshold_percent <= percent)
        .fold(None, |best: Option<&RewardBand>, band| match best {
            Some(current) if current.threshold_percent > band.threshold_percent => Some(current),
            _ => Some(band),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn goal(target: i64, mode: RewardMode) -> Goal {
        Goal {
            id: Uuid::nil(),
            responsible: "Ana".into(),
            period: "2024-03".into(),
            target_amount: Decimal::from(target),
            reward_mode: mode,
            updated_at: None,
        }
    }

    fn ladder() -> Vec<RewardBand> {
        // 35% -> 200, 40% -> 400, ..., 100% -> 2800
        (0..14).map(|i| RewardBand::new(35 + i * 5, 200 + i * 200)).collect()
    }

    #[test]
    fn commission_switches_rate_at_goal() {
        let engine = RewardEngine::default();
        let g = goal(10_000, RewardMode::Commission);

        assert_eq!(engine.compute_reward(&g, Decimal::from(9_999), None), Decimal::new(29997, 2));
        assert_eq!(engine.compute_reward(&g, Decimal::from(10_000), None), Decimal::from(500));
    }

    #[test]
    fn commission_rates_are_configurable() {
        let engine = RewardEngine::new(CommissionRates {
            below_goal: Decimal::new(12, 3),
            at_or_above_goal: Decimal::new(15, 3),
        });
        let g = goal(1_000, RewardMode::Commission);
        assert_eq!(engine.compute_reward(&g, Decimal::from(1_000), None), Decimal::from(15));
        assert_eq!(engine.compute_reward(&g, Decimal::from(500), None), Decimal::from(6));
    }

    #[test]
    fn bonus_is_a_floor_lookup() {
        let engine = RewardEngine::default();
        let bands = ladder();
        let g = goal(100, RewardMode::BonusTier);

        // 97% -> faixa de 95%, não 100%
        assert_eq!(engine.compute_reward(&g, Decimal::from(97), Some(&bands)), Decimal::from(2600));
        assert_eq!(engine.compute_reward(&g, Decimal::from(100), Some(&bands)), Decimal::from(2800));
        assert_eq!(engine.compute_reward(&g, Decimal::from(250), Some(&bands)), Decimal::from(2800));
        assert_eq!(engine.compute_reward(&g, Decimal::from(34), Some(&bands)), Decimal::ZERO);
    }

    #[test]
    fn floor_lookup_does_not_need_sorted_bands() {
        let mut bands = ladder();
        bands.reverse();
        let band = select_band(&bands, Decimal::from(97)).unwrap();
        assert_eq!(band.threshold_percent, Decimal::from(95));
    }

    #[test]
    fn later_band_wins_on_equal_thresholds() {
        let bands = vec![RewardBand::new(50, 100), RewardBand::new(50, 300)];
        assert_eq!(select_band(&bands, Decimal::from(60)).unwrap().bonus_amount, Decimal::from(300));
    }

    #[test]
    fn zero_target_never_panics() {
        let engine = RewardEngine::default();

        let commission = goal(0, RewardMode::Commission);
        assert_eq!(
            engine.compute_reward(&commission, Decimal::from(1_000), None),
            Decimal::from(1_000) * engine.rates().below_goal
        );

        let bonus = goal(0, RewardMode::BonusTier);
        assert_eq!(engine.compute_reward(&bonus, Decimal::from(1_000), Some(&ladder())), Decimal::ZERO);
        assert_eq!(percent_achieved(Decimal::from(1_000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn zero_sales_pay_below_goal_rate() {
        let engine = RewardEngine::default();
        let g = goal(1_000, RewardMode::Commission);
        assert_eq!(engine.compute_reward(&g, Decimal::ZERO, None), Decimal::ZERO);
    }

    #[test]
    fn bonus_without_table_is_zero() {
        let engine = RewardEngine::default();
        let g = goal(100, RewardMode::BonusTier);
        assert_eq!(engine.compute_reward(&g, Decimal::from(120), None), Decimal::ZERO);
        assert_eq!(engine.compute_reward(&g, Decimal::from(120), Some(&[])), Decimal::ZERO);
    }
}
