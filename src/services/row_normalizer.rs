// src/services/row_normalizer.rs

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use thiserror::Error;

use crate::{
    common::text::NOT_SPECIFIED,
    models::sales::SaleRecord,
    services::spreadsheet::{CellValue, RawRow},
};

// Rótulos aceitos por campo (já normalizados: minúsculas, sem acento)
const PRODUCT: &[&str] = &["produto"];
const CUSTOMER: &[&str] = &["cliente", "nome do cliente", "nome"];
const RESPONSIBLE: &[&str] = &["responsavel", "vendedor", "consultor"];
const REGISTERED_AT: &[&str] = &["data de cadastro", "cadastro"];
const PLAN: &[&str] = &["plano"];
const PAYMENT_METHOD: &[&str] = &["forma de pagamento", "pagamento"];
const AMOUNT: &[&str] = &["valor", "valor total"];
const SALE_DATE: &[&str] = &["data da venda", "data venda", "data"];

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Motivo para descartar uma linha. Não interrompe a ingestão.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("data de venda ausente")]
    MissingDate,
    #[error("data de venda inválida: '{0}'")]
    InvalidDate(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Só a data da venda pode reprovar a linha; os demais campos caem no
    /// sentinela ou em zero.
    pub fn normalize(&self, row: &RawRow) -> Result<SaleRecord, RowError> {
        let sale_date = match row.get_any(SALE_DATE) {
            None => return Err(RowError::MissingDate),
            Some(cell) => parse_date_cell(cell)
                .ok_or_else(|| RowError::InvalidDate(cell.as_text().unwrap_or_default()))?,
        };

        Ok(SaleRecord {
            product: text_or_sentinel(row, PRODUCT),
            customer_name: text_or_sentinel(row, CUSTOMER),
            responsible: text_or_sentinel(row, RESPONSIBLE),
            registered_at: row.get_any(REGISTERED_AT).and_then(parse_date_cell),
            plan: text_or_sentinel(row, PLAN),
            payment_method: text_or_sentinel(row, PAYMENT_METHOD),
            amount: row.get_any(AMOUNT).map(parse_amount_cell).unwrap_or(Decimal::ZERO),
            sale_date,
        })
    }
}

fn text_or_sentinel(row: &RawRow, labels: &[&str]) -> String {
    row.get_any(labels)
        .and_then(CellValue::as_text)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(date) => Some(*date),
        CellValue::Text(raw) => parse_br_date(raw),
        _ => None,
    }
}

/// Data no padrão fixo DD/MM/AAAA.
pub fn parse_br_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // O chrono aceita ano com sinal e mais dígitos; aqui só AAAA.
    let year = raw.rsplit('/').next()?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_amount_cell(cell: &CellValue) -> Decimal {
    let amount = match cell {
        CellValue::Number(n) => Decimal::from_f64(*n).map(|d| d.round_dp(2)).unwrap_or(Decimal::ZERO),
        CellValue::Text(raw) => parse_br_amount(raw),
        _ => Decimal::ZERO,
    };

    if amount.is_sign_negative() {
        tracing::debug!("Valor negativo {} zerado", amount);
        return Decimal::ZERO;
    }
    amount
}

/// Valor monetário no padrão brasileiro: "R$ 1.234,56" -> 1234.56.
/// Qualquer falha vira zero.
pub fn parse_br_amount(raw: &str) -> Decimal {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized = kept.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        RawRow::new(
            cells
                .iter()
                .map(|(label, value)| (label.to_string(), CellValue::Text(value.to_string())))
                .collect(),
        )
    }

    #[test]
    fn parses_brazilian_amounts() {
        assert_eq!(parse_br_amount("R$ 1.234,56"), Decimal::new(123456, 2));
        assert_eq!(parse_br_amount("1.000.000"), Decimal::new(1_000_000, 0));
        assert_eq!(parse_br_amount("89,9"), Decimal::new(899, 1));
        assert_eq!(parse_br_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_br_amount(""), Decimal::ZERO);
        assert_eq!(parse_br_amount("1,2,3"), Decimal::ZERO);
    }

    #[test]
    fn parses_fixed_date_pattern_only() {
        assert_eq!(parse_br_date("05/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_br_date(" 5/3/2024 "), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_br_date("2024-03-05"), None);
        assert_eq!(parse_br_date("31/02/2024"), None);
        assert_eq!(parse_br_date("05/03/24"), None);
        assert_eq!(parse_br_date("ontem"), None);
    }

    #[test]
    fn full_row_becomes_sale_record() {
        let sale = RowNormalizer::new()
            .normalize(&row(&[
                ("Produto", "Plano Anual"),
                ("Cliente", "Maria"),
                ("Responsável", " Carlos "),
                ("Data de Cadastro", "01/02/2024"),
                ("Plano", "Anual"),
                ("Forma de Pagamento", "Pix"),
                ("Valor", "R$ 1.234,56"),
                ("Data da Venda", "05/03/2024"),
            ]))
            .unwrap();

        assert_eq!(sale.product, "Plano Anual");
        assert_eq!(sale.responsible, "Carlos");
        assert_eq!(sale.registered_at, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(sale.amount, Decimal::new(123456, 2));
        assert_eq!(sale.sale_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn only_the_sale_date_is_mandatory() {
        let sale = RowNormalizer::new()
            .normalize(&row(&[("Data da Venda", "05/03/2024"), ("Valor", "abc"), ("Data de Cadastro", "???")]))
            .unwrap();

        assert_eq!(sale.product, NOT_SPECIFIED);
        assert_eq!(sale.customer_name, NOT_SPECIFIED);
        assert_eq!(sale.payment_method, NOT_SPECIFIED);
        assert_eq!(sale.registered_at, None);
        assert_eq!(sale.amount, Decimal::ZERO);
    }

    #[test]
    fn missing_or_bad_date_skips_the_row() {
        let normalizer = RowNormalizer::new();
        assert_eq!(
            normalizer.normalize(&row(&[("Produto", "Plano"), ("Valor", "10")])),
            Err(RowError::MissingDate)
        );
        assert_eq!(
            normalizer.normalize(&row(&[("Data da Venda", "2024-03-05")])),
            Err(RowError::InvalidDate("2024-03-05".into()))
        );
    }

    #[test]
    fn numeric_cells_skip_locale_rules() {
        let row = RawRow::new(vec![
            ("Data da Venda".into(), CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())),
            ("Valor".into(), CellValue::Number(1234.56)),
        ]);
        let sale = RowNormalizer::new().normalize(&row).unwrap();
        assert_eq!(sale.amount, Decimal::new(123456, 2));
    }

    #[test]
    fn negative_amounts_are_clamped() {
        let sale = RowNormalizer::new()
            .normalize(&row(&[("Data da Venda", "05/03/2024"), ("Valor", "-50,00")]))
            .unwrap();
        assert_eq!(sale.amount, Decimal::ZERO);
    }
}
