//! フィルタエンジン
//!
//! 全レコードから選択肢リストを導出し、検索語と選択状態から表示対象を計算する。
//! 再計算は同期・全件（カタログ規模のデータ量を前提）。

use crate::types::MineralRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 分類フィルタの次元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterDimension {
    ChemicalClass,
    CrystalSystem,
    Country,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::ChemicalClass,
        FilterDimension::CrystalSystem,
        FilterDimension::Country,
    ];

    /// レコードの該当属性
    pub fn value_of<'a>(&self, record: &'a MineralRecord) -> Option<&'a str> {
        match self {
            FilterDimension::ChemicalClass => record.chemical_class.as_deref(),
            FilterDimension::CrystalSystem => record.crystal_system.as_deref(),
            FilterDimension::Country => record.country.as_deref(),
        }
    }

    /// セレクタの先頭（未選択）に出すラベル
    pub fn any_label(&self) -> &'static str {
        match self {
            FilterDimension::ChemicalClass => "Todas las clases",
            FilterDimension::CrystalSystem => "Todos los sistemas",
            FilterDimension::Country => "Todos los países",
        }
    }
}

/// 検索・選択状態（入力のたびに再計算、保存しない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub chemical_class: Option<String>,
    pub crystal_system: Option<String>,
    pub country: Option<String>,
}

impl FilterState {
    pub fn selection(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::ChemicalClass => self.chemical_class.as_deref(),
            FilterDimension::CrystalSystem => self.crystal_system.as_deref(),
            FilterDimension::Country => self.country.as_deref(),
        }
    }

    /// セレクタの値を反映。空文字は未選択
    pub fn select(&mut self, dimension: FilterDimension, value: &str) {
        let value = if value.is_empty() { None } else { Some(value.to_string()) };
        match dimension {
            FilterDimension::ChemicalClass => self.chemical_class = value,
            FilterDimension::CrystalSystem => self.crystal_system = value,
            FilterDimension::Country => self.country = value,
        }
    }

    /// レコードが全条件を満たすか
    pub fn matches(&self, record: &MineralRecord) -> bool {
        self.matches_query(record)
            && FilterDimension::ALL.iter().all(|dimension| {
                match self.selection(*dimension) {
                    None => true,
                    Some(selected) => dimension.value_of(record) == Some(selected),
                }
            })
    }

    fn matches_query(&self, record: &MineralRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);

        contains(&record.name)
            || record.site.as_deref().is_some_and(contains)
            || record.country.as_deref().is_some_and(contains)
            || contains(&record.inventory_id)
    }
}

/// 各フィルタ次元の選択肢（重複なし・空なし・ソート済み）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub classes: Vec<String>,
    pub systems: Vec<String>,
    pub countries: Vec<String>,
}

impl FilterOptions {
    pub fn for_dimension(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::ChemicalClass => &self.classes,
            FilterDimension::CrystalSystem => &self.systems,
            FilterDimension::Country => &self.countries,
        }
    }
}

/// 全レコードから選択肢を導出
pub fn derive_filter_options(records: &[MineralRecord]) -> FilterOptions {
    let distinct = |dimension: FilterDimension| -> Vec<String> {
        records
            .iter()
            .filter_map(|r| dimension.value_of(r))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    };

    FilterOptions {
        classes: distinct(FilterDimension::ChemicalClass),
        systems: distinct(FilterDimension::CrystalSystem),
        countries: distinct(FilterDimension::Country),
    }
}

/// 条件に合うレコードを元の順序のまま返す
pub fn apply_filters<'a>(records: &'a [MineralRecord], state: &FilterState) -> Vec<&'a MineralRecord> {
    records.iter().filter(|r| state.matches(r)).collect()
}

/// `apply_filters` のインデックス版（カタログストア用）
pub fn filter_indices(records: &[MineralRecord], state: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| state.matches(r))
        .map(|(i, _)| i)
        .collect()
}
