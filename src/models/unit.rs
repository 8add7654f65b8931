// src/models/unit.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::common::error::AppError;

// --- Unidades (conjunto fixo) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Matriz,
    Centro,
    ZonaSul,
    ZonaNorte,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Matriz, Unit::Centro, Unit::ZonaSul, Unit::ZonaNorte];

    /// Segmento usado nos caminhos `faturamento/{unitId}/...`
    pub fn id(&self) -> &'static str {
        match self {
            Unit::Matriz => "matriz",
            Unit::Centro => "centro",
            Unit::ZonaSul => "zona-sul",
            Unit::ZonaNorte => "zona-norte",
        }
    }

    pub fn band_schedule(&self) -> BandSchedule {
        match self {
            Unit::Matriz => BandSchedule::FLAGSHIP,
            _ => BandSchedule::STANDARD,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Unit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.id() == s)
            .ok_or_else(|| AppError::InvalidUnit(s.to_string()))
    }
}

// --- Parâmetros da tabela de premiação padrão ---

/// Curva de bônus em dois regimes lineares: até antes do `cutoff` cada faixa
/// soma `increment_below`; do `cutoff` até `upper_bound` soma `increment_above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSchedule {
    pub start: u32,
    pub step: u32,
    pub cutoff: u32,
    pub increment_below: Decimal,
    pub increment_above: Decimal,
    pub upper_bound: u32,
}

impl BandSchedule {
    pub const FLAGSHIP: BandSchedule = BandSchedule {
        start: 35,
        step: 5,
        cutoff: 100,
        increment_below: Decimal::from_parts(200, 0, 0, false, 0),
        increment_above: Decimal::from_parts(300, 0, 0, false, 0),
        upper_bound: 150,
    };

    pub const STANDARD: BandSchedule = BandSchedule {
        start: 35,
        step: 5,
        cutoff: 100,
        increment_below: Decimal::from_parts(150, 0, 0, false, 0),
        increment_above: Decimal::from_parts(200, 0, 0, false, 0),
        upper_bound: 150,
    };

    /// Ids desconhecidos caem no regime mais baixo.
    pub fn for_unit_id(unit_id: &str) -> BandSchedule {
        unit_id
            .parse::<Unit>()
            .map(|unit| unit.band_schedule())
            .unwrap_or(BandSchedule::STANDARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_units_only() {
        assert_eq!("matriz".parse::<Unit>().unwrap(), Unit::Matriz);
        assert_eq!("zona-sul".parse::<Unit>().unwrap(), Unit::ZonaSul);
        assert!(matches!("nowhere".parse::<Unit>(), Err(AppError::InvalidUnit(u)) if u == "nowhere"));
        assert!("Matriz".parse::<Unit>().is_err());
    }

    #[test]
    fn flagship_accrues_faster_than_the_others() {
        let flagship = BandSchedule::for_unit_id("matriz");
        let standard = BandSchedule::for_unit_id("centro");
        assert!(flagship.increment_below > standard.increment_below);
        assert!(flagship.increment_above > standard.increment_above);
    }

    #[test]
    fn unknown_unit_falls_back_to_standard_schedule() {
        assert_eq!(BandSchedule::for_unit_id("nowhere"), BandSchedule::STANDARD);
    }
}
