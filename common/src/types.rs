//! 標本レコードの型定義
//!
//! データセットはコレクション台帳（Excel）の列見出しをそのままキーにしたJSON。
//! 数値セルや空セルが混在するため、文字列属性は寛容にデシリアライズする:
//! - 文字列はそのまま
//! - 数値はブラウザ表示と同じ書式（整数値なら小数点なし）
//! - null・キー欠落・空文字は「なし」

use serde::{Deserialize, Serialize};

/// 標本1点（カタログの1レコード）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MineralRecord {
    /// 在庫番号。画像フォルダのキーで検索対象
    #[serde(rename = "Nº Inventario", default, deserialize_with = "lenient::required")]
    pub inventory_id: String,

    /// 表示名
    #[serde(rename = "Mineral", default, deserialize_with = "lenient::required")]
    pub name: String,

    #[serde(rename = "Fórmula química", default, deserialize_with = "lenient::optional")]
    pub chemical_formula: Option<String>,

    #[serde(rename = "Clase química", default, deserialize_with = "lenient::optional")]
    pub chemical_class: Option<String>,

    #[serde(rename = "Sistema cristalino", default, deserialize_with = "lenient::optional")]
    pub crystal_system: Option<String>,

    #[serde(rename = "Pais", default, deserialize_with = "lenient::optional")]
    pub country: Option<String>,

    /// 産地（国より優先して表示）
    #[serde(rename = "Yacimiento", default, deserialize_with = "lenient::optional")]
    pub site: Option<String>,

    #[serde(rename = "Variedad", default, deserialize_with = "lenient::optional")]
    pub variety: Option<String>,

    #[serde(rename = "Hábito / Morfología", default, deserialize_with = "lenient::optional")]
    pub habit: Option<String>,

    #[serde(rename = "Dimensiones (mm)", default, deserialize_with = "lenient::optional")]
    pub dimensions_mm: Option<String>,

    #[serde(rename = "Peso (Gramos)", default, deserialize_with = "lenient::optional")]
    pub weight_grams: Option<String>,

    #[serde(rename = "Color", default, deserialize_with = "lenient::optional")]
    pub color: Option<String>,

    /// 光沢
    #[serde(rename = "Brillo", default, deserialize_with = "lenient::optional")]
    pub luster: Option<String>,

    #[serde(rename = "Notas", default, deserialize_with = "lenient::optional")]
    pub notes: Option<String>,

    // 以下は台帳にのみ存在する列。画面には出さず統計で使う
    #[serde(rename = "Min_asociado", default, deserialize_with = "lenient::optional")]
    pub associated_minerals: Option<String>,

    #[serde(rename = "Transparencia", default, deserialize_with = "lenient::optional")]
    pub transparency: Option<String>,

    #[serde(rename = "Cristal (mm)", default, deserialize_with = "lenient::optional")]
    pub crystal_size_mm: Option<String>,

    #[serde(rename = "Fecha Adquisición", default, deserialize_with = "lenient::optional")]
    pub acquired_on: Option<String>,

    #[serde(rename = "Precio Compra", default, deserialize_with = "lenient::optional")]
    pub purchase_price: Option<String>,

    #[serde(rename = "Info", default, deserialize_with = "lenient::optional")]
    pub info: Option<String>,

    /// 評価額（ユーロ）
    #[serde(rename = "Valor estimado (€)", default, deserialize_with = "lenient::optional_number")]
    pub estimated_value: Option<f64>,

    #[serde(rename = "Fecha Tasación", default, deserialize_with = "lenient::optional")]
    pub appraised_on: Option<String>,
}

impl MineralRecord {
    /// 表示用の産地: 産地 → 国 の順で最初に存在するもの
    pub fn origin(&self) -> Option<&str> {
        self.site.as_deref().or(self.country.as_deref())
    }

    /// 重量の表示文字列（単位付き）。0 は未計測として扱う
    pub fn weight_label(&self) -> Option<String> {
        self.weight_grams
            .as_deref()
            .filter(|w| w.trim().parse::<f64>().map_or(true, |g| g != 0.0))
            .map(|w| format!("{} g", w))
    }
}

/// JSON数値をブラウザと同じ書式で文字列化
pub fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or_default();
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// 任意のJSON値を表示用テキストへ（空は None）
pub fn value_to_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::value_to_text(&value))
    }

    pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional(deserializer)?.unwrap_or_default())
    }

    pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_default() {
        let record = MineralRecord::default();
        assert_eq!(record.inventory_id, "");
        assert!(record.country.is_none());
    }

    #[test]
    fn test_record_deserialize_spanish_keys() {
        let json = r#"{
            "Nº Inventario": "M-001",
            "Mineral": "Cuarzo",
            "Fórmula química": "SiO2",
            "Clase química": "Silicatos",
            "Sistema cristalino": "Trigonal",
            "Pais": "España",
            "Yacimiento": "Mina de Horcajo",
            "Hábito / Morfología": "Prismático",
            "Brillo": "Vítreo"
        }"#;

        let record: MineralRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.inventory_id, "M-001");
        assert_eq!(record.name, "Cuarzo");
        assert_eq!(record.chemical_formula.as_deref(), Some("SiO2"));
        assert_eq!(record.habit.as_deref(), Some("Prismático"));
        assert_eq!(record.luster.as_deref(), Some("Vítreo"));
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_blank_and_null_are_absent() {
        let json = r#"{"Nº Inventario": "A1", "Mineral": "Pirita", "Variedad": "", "Notas": null}"#;
        let record: MineralRecord = serde_json::from_str(json).unwrap();
        assert!(record.variety.is_none());
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_numbers_render_like_browser() {
        let json = r#"{
            "Nº Inventario": 17,
            "Mineral": "Fluorita",
            "Peso (Gramos)": 125.0,
            "Dimensiones (mm)": 40.5,
            "Valor estimado (€)": 30
        }"#;
        let record: MineralRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.inventory_id, "17");
        assert_eq!(record.weight_grams.as_deref(), Some("125"));
        assert_eq!(record.dimensions_mm.as_deref(), Some("40.5"));
        assert_eq!(record.estimated_value, Some(30.0));
    }

    #[test]
    fn test_estimated_value_from_text() {
        let json = r#"{"Nº Inventario": "A1", "Mineral": "Oro", "Valor estimado (€)": " 12,50 "}"#;
        let record: MineralRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.estimated_value, Some(12.5));
    }

    #[test]
    fn test_weight_label_skips_zero() {
        let record: MineralRecord = serde_json::from_str(r#"{"Peso (Gramos)": 0}"#).unwrap();
        assert_eq!(record.weight_label(), None);

        let record: MineralRecord = serde_json::from_str(r#"{"Peso (Gramos)": 0.0}"#).unwrap();
        assert_eq!(record.weight_label(), None);

        let record: MineralRecord = serde_json::from_str(r#"{"Peso (Gramos)": 12.5}"#).unwrap();
        assert_eq!(record.weight_label().as_deref(), Some("12.5 g"));

        let record: MineralRecord = serde_json::from_str(r#"{"Peso (Gramos)": "aprox. 30"}"#).unwrap();
        assert_eq!(record.weight_label().as_deref(), Some("aprox. 30 g"));
    }

    #[test]
    fn test_origin_prefers_site() {
        let mut record = MineralRecord {
            site: Some("Panasqueira".to_string()),
            country: Some("Portugal".to_string()),
            ..Default::default()
        };
        assert_eq!(record.origin(), Some("Panasqueira"));

        record.site = None;
        assert_eq!(record.origin(), Some("Portugal"));

        record.country = None;
        assert_eq!(record.origin(), None);
    }

    #[test]
    fn test_weight_label() {
        let record = MineralRecord {
            weight_grams: Some("85".to_string()),
            ..Default::default()
        };
        assert_eq!(record.weight_label().as_deref(), Some("85 g"));
        assert!(MineralRecord::default().weight_label().is_none());
    }
}
