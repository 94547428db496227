//! Agrupación diaria de documentos para el reporte.
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::storage::StoredDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyCounts {
    pub success: usize,
    pub failed: usize,
}

/// Agrupa por fecha UTC de creación. Todo lo que no sea `Success` cuenta
/// como fallido.
pub fn group_by_date(docs: &[StoredDocument]) -> BTreeMap<NaiveDate, DailyCounts> {
    let mut grouped: BTreeMap<NaiveDate, DailyCounts> = BTreeMap::new();
    for doc in docs {
        let counts = grouped.entry(doc.created_date.date_naive()).or_default();
        if doc.is_success() {
            counts.success += 1;
        } else {
            counts.failed += 1;
        }
    }
    grouped
}

/// Serie de los últimos `days` días terminando en `today` (ascendente);
/// los días sin datos cuentan cero.
pub fn last_days(grouped: &BTreeMap<NaiveDate, DailyCounts>, today: NaiveDate, days: u32) -> Vec<(NaiveDate, DailyCounts)> {
    (0..i64::from(days)).rev()
                        .map(|back| {
                            let day = today - Duration::days(back);
                            (day, grouped.get(&day).copied().unwrap_or_default())
                        })
                        .collect()
}
