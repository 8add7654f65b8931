// src/models/period.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::common::error::AppError;

/// Mês de calendário no formato "YYYY-MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Segmento do mês nos caminhos de documentos ("03").
    pub fn month_segment(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("Período '{}' inválido. Use AAAA-MM.", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        // Garante que o mês existe no calendário
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_year_month() {
        let period: Period = "2024-03".parse().unwrap();
        assert_eq!(period, Period { year: 2024, month: 3 });
        assert_eq!(period.to_string(), "2024-03");
        assert_eq!(period.month_segment(), "03");
    }

    #[test]
    fn rejects_malformed_periods() {
        for raw in ["2024-13", "2024-3", "24-03", "2024/03", "", "abcd-ef"] {
            assert!(raw.parse::<Period>().is_err(), "{raw} deveria ser rejeitado");
        }
    }
}
