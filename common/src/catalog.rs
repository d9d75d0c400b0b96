//! カタログストア
//!
//! 起動時に一度だけ読み込んだ全レコードと、現在の絞り込み結果を保持する。
//! 絞り込み結果は全レコードへのインデックス列。

use crate::error::LoadError;
use crate::filter::{derive_filter_options, filter_indices, FilterOptions, FilterState};
use crate::types::MineralRecord;

/// データセットのファイル名（ブラウザ版は相対URLとして使う）
pub const DATASET_FILE: &str = "catalogo_minerales.json";

/// 読み込み失敗時にステータス行へ出す文言
pub const LOAD_ERROR_STATUS: &str = "Error al cargar la colección.";

/// データセットJSON（レコード配列）をパース
pub fn parse_catalog(json: &str) -> Result<Vec<MineralRecord>, LoadError> {
    let records: Vec<MineralRecord> = serde_json::from_str(json)?;
    tracing::debug!(count = records.len(), "catalog parsed");
    Ok(records)
}

/// データセットファイルを読み込む（WASM以外）
#[cfg(not(target_arch = "wasm32"))]
pub fn load_catalog_file(path: &std::path::Path) -> crate::error::Result<Vec<MineralRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_catalog(&content)?)
}

/// ステータス行の文言
pub fn status_text(shown: usize, total: usize) -> String {
    format!("Mostrando {} de {} ejemplares", shown, total)
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MineralRecord>,
    filtered: Vec<usize>,
}

impl Catalog {
    /// 読み込み直後は全件が表示対象
    pub fn new(records: Vec<MineralRecord>) -> Self {
        let filtered = (0..records.len()).collect();
        Self { records, filtered }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(Self::new(parse_catalog(json)?))
    }

    pub fn records(&self) -> &[MineralRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 絞り込みを再計算して件数を返す
    pub fn refilter(&mut self, state: &FilterState) -> usize {
        self.filtered = filter_indices(&self.records, state);
        tracing::debug!(
            shown = self.filtered.len(),
            total = self.records.len(),
            "filters applied"
        );
        self.filtered.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// 絞り込み結果の n 番目
    pub fn filtered_get(&self, position: usize) -> Option<&MineralRecord> {
        self.filtered.get(position).and_then(|&i| self.records.get(i))
    }

    pub fn filtered(&self) -> impl Iterator<Item = &MineralRecord> + '_ {
        self.filtered.iter().filter_map(move |&i| self.records.get(i))
    }

    pub fn filter_options(&self) -> FilterOptions {
        derive_filter_options(&self.records)
    }

    pub fn status_text(&self) -> String {
        status_text(self.filtered.len(), self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterDimension;

    const DATASET: &str = r#"[
        {"Nº Inventario": "A1", "Mineral": "Quartz", "Clase química": "Silicate", "Pais": "Spain"},
        {"Nº Inventario": "A2", "Mineral": "Pyrite", "Clase química": "Sulfide", "Pais": "Peru"},
        {"Nº Inventario": "A3", "Mineral": "Galena", "Clase química": "Sulfide", "Pais": "Spain"}
    ]"#;

    #[test]
    fn test_initial_subset_is_everything() {
        let catalog = Catalog::from_json(DATASET).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.filtered_len(), 3);
        assert_eq!(catalog.status_text(), "Mostrando 3 de 3 ejemplares");
    }

    #[test]
    fn test_refilter_updates_subset() {
        let mut catalog = Catalog::from_json(DATASET).unwrap();
        let mut state = FilterState::default();
        state.select(FilterDimension::Country, "Spain");

        assert_eq!(catalog.refilter(&state), 2);
        assert_eq!(catalog.filtered_get(1).map(|r| r.name.as_str()), Some("Galena"));
        assert!(catalog.filtered_get(2).is_none());
        assert_eq!(catalog.status_text(), "Mostrando 2 de 3 ejemplares");
    }

    #[test]
    fn test_empty_subset_is_not_an_error() {
        let mut catalog = Catalog::from_json(DATASET).unwrap();
        let state = FilterState {
            query: "zzz".to_string(),
            ..Default::default()
        };
        assert_eq!(catalog.refilter(&state), 0);
        assert_eq!(catalog.filtered().count(), 0);
        assert_eq!(catalog.status_text(), "Mostrando 0 de 3 ejemplares");
    }

    #[test]
    fn test_parse_failure() {
        let result = parse_catalog(r#"{"Mineral": "not an array"}"#);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_load_catalog_file_missing() {
        let result = load_catalog_file(std::path::Path::new("/nonexistent/catalogo.json"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn test_filter_options_from_catalog() {
        let catalog = Catalog::from_json(DATASET).unwrap();
        let options = catalog.filter_options();
        assert_eq!(options.classes, vec!["Silicate", "Sulfide"]);
        assert_eq!(options.countries, vec!["Peru", "Spain"]);
    }
}
