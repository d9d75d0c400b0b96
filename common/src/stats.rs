//! コレクション統計（CLIの集計表示用）

use crate::filter::FilterDimension;
use crate::types::MineralRecord;
use std::collections::HashMap;

/// 値ごとの件数を多い順に。同数は値の昇順
pub fn count_by(records: &[MineralRecord], dimension: FilterDimension) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if let Some(value) = dimension.value_of(record).filter(|v| !v.is_empty()) {
            *counts.entry(value).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// 件数上位 n 件
pub fn top_by(records: &[MineralRecord], dimension: FilterDimension, n: usize) -> Vec<(String, usize)> {
    let mut counts = count_by(records, dimension);
    counts.truncate(n);
    counts
}

/// 評価額の合計。評価額のあるレコードが1件もなければ None
pub fn total_estimated_value(records: &[MineralRecord]) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.estimated_value).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum())
    }
}

/// 千区切り・小数2桁（例: 12,345.67）
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: Option<&str>, value: Option<f64>) -> MineralRecord {
        MineralRecord {
            country: country.map(str::to_string),
            estimated_value: value,
            ..Default::default()
        }
    }

    #[test]
    fn test_count_by_country() {
        let records = vec![
            record(Some("Spain"), None),
            record(Some("Peru"), None),
            record(Some("Spain"), None),
            record(None, None),
            record(Some("Morocco"), None),
        ];
        let counts = count_by(&records, FilterDimension::Country);
        assert_eq!(
            counts,
            vec![
                ("Spain".to_string(), 2),
                ("Morocco".to_string(), 1),
                ("Peru".to_string(), 1),
            ]
        );
        assert_eq!(top_by(&records, FilterDimension::Country, 1).len(), 1);
    }

    #[test]
    fn test_total_estimated_value() {
        assert_eq!(total_estimated_value(&[record(None, None)]), None);
        let records = vec![record(None, Some(10.5)), record(None, None), record(None, Some(4.5))];
        assert_eq!(total_estimated_value(&records), Some(15.0));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-2500.0), "-2,500.00");
    }
}
