// src/services/aggregator.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::sales::SaleRecord;

/// Agrupa as vendas válidas por dia da venda. Partição pura: nenhuma conta
/// cruza datas e a ordem original é mantida dentro de cada dia.
pub fn group_by_day(sales: Vec<SaleRecord>) -> BTreeMap<NaiveDate, Vec<SaleRecord>> {
    let mut days: BTreeMap<NaiveDate, Vec<SaleRecord>> = BTreeMap::new();
    for sale in sales {
        days.entry(sale.sale_date).or_default().push(sale);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sale(product: &str, day: u32) -> SaleRecord {
        SaleRecord {
            product: product.into(),
            customer_name: "Cliente".into(),
            responsible: "Ana".into(),
            registered_at: None,
            plan: "Mensal".into(),
            payment_method: "Pix".into(),
            amount: Decimal::TEN,
            sale_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        }
    }

    #[test]
    fn partitions_by_sale_date_keeping_row_order() {
        let days = group_by_day(vec![sale("a", 5), sale("b", 6), sale("c", 5)]);

        assert_eq!(days.len(), 2);
        let fifth = &days[&NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()];
        assert_eq!(fifth.iter().map(|s| s.product.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn no_sales_means_no_days() {
        assert!(group_by_day(Vec::new()).is_empty());
    }
}
