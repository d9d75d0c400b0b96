//! 表示レイアウト定義
//!
//! カード・詳細ビューに出す項目と、画像パスの命名規則。
//! ツールキット非依存の表示モデルなので、Web版とデスクトップ版の両方で使う。

use crate::types::MineralRecord;

/// 画像フォルダのルート（`{root}/{在庫番号}/{n}.jpg`）
pub const DEFAULT_IMAGE_ROOT: &str = "images";

/// カードの表紙が読めないときの代替画像
pub const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/400x300?text=Sin+Imagen";

/// 詳細・全画面のメイン画像が読めないときの代替画像
pub const DETAIL_PLACEHOLDER: &str = "https://via.placeholder.com/800x600?text=Imagen+no+disponible";

/// 値なしの表示
pub const EMPTY_VALUE: &str = "-";

/// 備考なしの表示
pub const NOTES_FALLBACK: &str = "Sin notas adicionales.";

/// 標本1点あたりの最大画像数
pub const GALLERY_SIZE: u8 = 4;

/// 画像パス `{root}/{id}/{index}.jpg`
pub fn image_path(root: &str, inventory_id: &str, index: u8) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        format!("{}/{}.jpg", inventory_id, index)
    } else {
        format!("{}/{}/{}.jpg", root, inventory_id, index)
    }
}

/// 表紙画像（1枚目）
pub fn cover_path(root: &str, inventory_id: &str) -> String {
    image_path(root, inventory_id, 1)
}

/// グリッドのカード1枚分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub inventory_tag: String,
    pub cover_src: String,
    pub name: String,
    pub formula: String,
    pub origin: String,
    pub class: String,
}

impl CardView {
    pub fn from_record(record: &MineralRecord, image_root: &str) -> Self {
        Self {
            inventory_tag: record.inventory_id.clone(),
            cover_src: cover_path(image_root, &record.inventory_id),
            name: record.name.clone(),
            formula: record.chemical_formula.clone().unwrap_or_default(),
            origin: record.origin().unwrap_or(EMPTY_VALUE).to_string(),
            class: record
                .chemical_class
                .clone()
                .unwrap_or_else(|| EMPTY_VALUE.to_string()),
        }
    }
}

/// 詳細グリッドの1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// 詳細ビュー（ギャラリー以外の部分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub inventory_id: String,
    pub title: String,
    pub formula: String,
    pub notes: String,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    pub fn from_record(record: &MineralRecord) -> Self {
        let field = |label: &'static str, value: Option<&str>| DetailField {
            label,
            value: value.unwrap_or(EMPTY_VALUE).to_string(),
        };
        let weight = record.weight_label();

        Self {
            inventory_id: record.inventory_id.clone(),
            title: record.name.clone(),
            formula: record.chemical_formula.clone().unwrap_or_default(),
            notes: record
                .notes
                .clone()
                .unwrap_or_else(|| NOTES_FALLBACK.to_string()),
            fields: vec![
                field("Variedad", record.variety.as_deref()),
                field("Hábito", record.habit.as_deref()),
                field("Yacimiento", record.site.as_deref()),
                field("País", record.country.as_deref()),
                field("Dimensiones", record.dimensions_mm.as_deref()),
                field("Peso", weight.as_deref()),
                field("Color", record.color.as_deref()),
                field("Brillo", record.luster.as_deref()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_convention() {
        assert_eq!(image_path("images", "M-12", 1), "images/M-12/1.jpg");
        assert_eq!(image_path("images/", "M-12", 3), "images/M-12/3.jpg");
        assert_eq!(image_path("", "M-12", 2), "M-12/2.jpg");
        assert_eq!(cover_path("/srv/coleccion", "7"), "/srv/coleccion/7/1.jpg");
    }

    #[test]
    fn test_card_view() {
        let record = MineralRecord {
            inventory_id: "A1".to_string(),
            name: "Quartz".to_string(),
            chemical_formula: Some("SiO2".to_string()),
            country: Some("Spain".to_string()),
            ..Default::default()
        };
        let card = CardView::from_record(&record, DEFAULT_IMAGE_ROOT);
        assert_eq!(card.inventory_tag, "A1");
        assert_eq!(card.cover_src, "images/A1/1.jpg");
        assert_eq!(card.formula, "SiO2");
        assert_eq!(card.origin, "Spain");
        assert_eq!(card.class, "-");
    }

    #[test]
    fn test_detail_view_defaults() {
        let record = MineralRecord {
            inventory_id: "B7".to_string(),
            name: "Fluorite".to_string(),
            site: Some("Berbes".to_string()),
            weight_grams: Some("210".to_string()),
            ..Default::default()
        };
        let detail = DetailView::from_record(&record);

        assert_eq!(detail.notes, NOTES_FALLBACK);
        assert_eq!(detail.formula, "");
        assert_eq!(detail.fields.len(), 8);

        let value = |label: &str| {
            detail
                .fields
                .iter()
                .find(|f| f.label == label)
                .map(|f| f.value.clone())
                .unwrap()
        };
        assert_eq!(value("Yacimiento"), "Berbes");
        assert_eq!(value("Peso"), "210 g");
        assert_eq!(value("País"), "-");
        assert_eq!(value("Brillo"), "-");
    }

    #[test]
    fn test_detail_field_order() {
        let detail = DetailView::from_record(&MineralRecord::default());
        let labels: Vec<_> = detail.fields.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec!["Variedad", "Hábito", "Yacimiento", "País", "Dimensiones", "Peso", "Color", "Brillo"]
        );
    }
}
