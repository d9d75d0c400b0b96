//! 台帳Excel → カタログJSON 変換
//!
//! 1枚目のシートの先頭行を列名として、1行1レコードのJSON配列を書き出す。
//! 既存のJSONがあれば上書き前にタイムスタンプ付きでバックアップする。

pub mod cells;

use crate::error::{CatalogError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{DateTime, Local};
use mineral_catalog_common::stats::{top_by, total_estimated_value};
use mineral_catalog_common::{FilterDimension, MineralRecord};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub type Row = Map<String, Value>;

/// 変換結果の要約
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub columns: Vec<String>,
    pub records: usize,
    pub backup: Option<PathBuf>,
    pub top_countries: Vec<(String, usize)>,
    pub total_value: Option<f64>,
}

/// シートを列名と行に分解
pub fn sheet_to_rows(range: &Range<Data>) -> Result<(Vec<String>, Vec<Row>)> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| CatalogError::Workbook("la hoja está vacía".into()))?;

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("Unnamed: {}", i),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    let records = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let cell = row.get(i).unwrap_or(&Data::Empty);
                    (column.clone(), cells::cell_to_value(column, cell))
                })
                .collect::<Row>()
        })
        .collect();

    Ok((columns, records))
}

/// ブックの1枚目のシートを読む
pub fn read_workbook(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogError::Workbook("el libro no tiene hojas".into()))??;
    tracing::debug!(rows = range.height(), cols = range.width(), "worksheet loaded");

    sheet_to_rows(&range)
}

/// バックアップファイル名 `{stem}_backup_{YYYYmmdd_HHMMSS}.json`
pub fn backup_path(json_path: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = json_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("catalogo_minerales");
    json_path.with_file_name(format!("{}_backup_{}.json", stem, now.format("%Y%m%d_%H%M%S")))
}

/// 既存JSONがあればコピーしてバックアップ先を返す
pub fn backup_existing(json_path: &Path, now: DateTime<Local>) -> Result<Option<PathBuf>> {
    if !json_path.exists() {
        return Ok(None);
    }
    let target = backup_path(json_path, now);
    std::fs::copy(json_path, &target)?;
    Ok(Some(target))
}

/// 行を整形JSONで書き出し、統計用にレコードとして読み直す
pub fn write_catalog(rows: Vec<Row>, output: &Path) -> Result<Vec<MineralRecord>> {
    let value = Value::Array(rows.into_iter().map(Value::Object).collect());
    let json = serde_json::to_string_pretty(&value)?;
    std::fs::write(output, json)?;

    let records: Vec<MineralRecord> = serde_json::from_value(value)?;
    Ok(records)
}

/// 変換の全工程
pub fn convert(input: &Path, output: &Path, backup: bool, top: usize) -> Result<ConvertReport> {
    println!("{}", "-".repeat(60));
    println!("CONVERSOR EXCEL -> JSON - CATALOGO DE MINERALES");
    println!("{}", "-".repeat(60));

    if !input.exists() {
        return Err(CatalogError::FileNotFound(input.display().to_string()));
    }
    println!("\nArchivo Excel encontrado: {}", input.display());

    let backup = if backup {
        let saved = backup_existing(output, Local::now())?;
        if let Some(path) = &saved {
            println!("   Backup guardado como: {}", path.display());
        }
        saved
    } else {
        None
    };

    println!("\nLeyendo archivo Excel...");
    let (columns, rows) = read_workbook(input)?;
    println!("   Total de minerales: {}", rows.len());

    println!("\nColumnas encontradas ({}):", columns.len());
    for (i, column) in columns.iter().enumerate() {
        println!("   {:2}. {}", i + 1, column);
    }

    println!("\nGenerando JSON...");
    let records = write_catalog(rows, output)?;
    println!("✔ JSON generado: {}", output.display());

    Ok(ConvertReport {
        columns,
        records: records.len(),
        backup,
        top_countries: top_by(&records, FilterDimension::Country, top),
        total_value: total_estimated_value(&records),
    })
}
