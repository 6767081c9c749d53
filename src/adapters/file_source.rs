use crate::domain::model::Creature;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PokedexError, Result};
use crate::utils::validation::{validate_file_extension, validate_path};
use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "json"];

/// Columns that stay strings even when they look numeric.
const TEXT_COLUMNS: [&str; 3] = ["name", "type_one", "type_two"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let display = path.to_string_lossy();
        validate_file_extension("catalog.source", &display, &SUPPORTED_EXTENSIONS)?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            _ => Ok(Self::Json),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate_path("catalog.source", &path.to_string_lossy())?;
        let format = CatalogFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Vec<Creature>> {
        tracing::debug!("Reading catalog file {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;

        match self.format {
            CatalogFormat::Csv => parse_csv(&data),
            CatalogFormat::Json => Ok(serde_json::from_slice(&data)?),
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

pub fn parse_csv(data: &[u8]) -> Result<Vec<Creature>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);
    let headers = reader.headers()?.clone();
    let mut creatures = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let mut object = Map::new();

        for (header, cell) in headers.iter().zip(row.iter()) {
            if TEXT_COLUMNS.contains(&header) {
                object.insert(header.to_string(), Value::String(cell.to_string()));
            } else if let Some(value) = infer_cell(cell) {
                object.insert(header.to_string(), value);
            }
        }

        // 第 1 行是標題，資料從第 2 行開始
        let creature = serde_json::from_value(Value::Object(object)).map_err(|e| {
            PokedexError::SourceError {
                message: format!("row {}: {}", index + 2, e),
            }
        })?;
        creatures.push(creature);
    }

    Ok(creatures)
}

/// Empty cells are treated as absent.
fn infer_cell(cell: &str) -> Option<Value> {
    if cell.is_empty() {
        return None;
    }
    if let Ok(int) = cell.parse::<i64>() {
        return Some(Value::from(int));
    }
    if let Some(float) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Some(Value::Number(float));
    }
    match cell.to_ascii_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => Some(Value::String(cell.to_string())),
    }
}
