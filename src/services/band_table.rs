// src/services/band_table.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{rewards::RewardBand, unit::BandSchedule},
};

/// Tabela padrão da unidade. Ids desconhecidos usam o regime mais baixo.
pub fn generate_default_bands(unit_id: &str) -> Vec<RewardBand> {
    generate_bands(&BandSchedule::for_unit_id(unit_id))
}

/// Gera as faixas de `start` até `upper_bound` de `step` em `step`. A primeira
/// faixa vale um incremento; cada faixa seguinte soma o incremento do seu
/// regime (abaixo do `cutoff` ou a partir dele).
pub fn generate_bands(schedule: &BandSchedule) -> Vec<RewardBand> {
    let mut bands = Vec::new();
    if schedule.step == 0 {
        return bands;
    }

    let mut bonus = Decimal::ZERO;
    let mut percent = schedule.start;
    while percent <= schedule.upper_bound {
        bonus += if percent < schedule.cutoff {
            schedule.increment_below
        } else {
            schedule.increment_above
        };
        bands.push(RewardBand::new(percent, bonus));
        percent += schedule.step;
    }
    bands
}

/// Prepara uma tabela editada para gravação: rejeita valores negativos,
/// ordena por percentual e, em percentuais repetidos, fica com a última.
pub fn normalize_bands(bands: Vec<RewardBand>) -> Result<Vec<RewardBand>, AppError> {
    if let Some(bad) = bands
        .iter()
        .find(|b| b.threshold_percent.is_sign_negative() || b.bonus_amount.is_sign_negative())
    {
        return Err(AppError::InvalidInput(format!(
            "Faixa inválida ({}%, {}): percentual e valor não podem ser negativos.",
            bad.threshold_percent, bad.bonus_amount
        )));
    }

    // Ordenação estável: entre percentuais iguais a ordem de envio é mantida
    let mut sorted = bands;
    sorted.sort_by(|a, b| a.threshold_percent.cmp(&b.threshold_percent));

    let mut result: Vec<RewardBand> = Vec::with_capacity(sorted.len());
    for band in sorted {
        match result.last_mut() {
            Some(last) if last.threshold_percent == band.threshold_percent => *last = band,
            _ => result.push(band),
        }
    }
    Ok(result)
}
