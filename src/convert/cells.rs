//! セル値 → JSON値

use calamine::Data;
use serde_json::{Number, Value};

/// 空セルを空文字にする列（それ以外の空セルは null）
pub const TEXT_COLUMNS: &[&str] = &[
    "Variedad",
    "Min_asociado",
    "Transparencia",
    "Cristal (mm)",
    "Fecha Adquisición",
    "Precio Compra",
    "Notas",
    "Info",
    "Brillo",
    "Color",
    "Hábito / Morfología",
];

pub fn is_text_column(column: &str) -> bool {
    TEXT_COLUMNS.contains(&column)
}

/// 日付列（`Fecha ...`）は年月日だけを書く
pub fn is_date_column(column: &str) -> bool {
    column.contains("Fecha")
}

pub fn cell_to_value(column: &str, cell: &Data) -> Value {
    match cell {
        Data::Empty => empty_value(column),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => float_value(*f).unwrap_or_else(|| empty_value(column)),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if is_date_column(column) => {
                Value::String(datetime.format("%Y-%m-%d").to_string())
            }
            Some(datetime) => Value::String(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => float_value(dt.as_f64()).unwrap_or_else(|| empty_value(column)),
        },
        Data::DateTimeIso(s) if is_date_column(column) => {
            Value::String(s.get(..10).unwrap_or(s).to_string())
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => empty_value(column),
    }
}

fn empty_value(column: &str) -> Value {
    if is_text_column(column) {
        Value::String(String::new())
    } else {
        Value::Null
    }
}

/// 整数値の浮動小数は整数として書く。NaN等は None
fn float_value(f: f64) -> Option<Value> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Some(Value::Number((f as i64).into()));
    }
    Number::from_f64(f).map(Value::Number)
}
