// src/services/spreadsheet.rs

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;

use crate::common::{error::AppError, text::fold_label};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04"; // xlsx, ods
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0]; // xls

// --- Células e linhas ---

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Texto da célula, sem espaços nas pontas. `None` para células vazias.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Date(d) => Some(d.format("%d/%m/%Y").to_string()),
        }
    }
}

/// Uma linha de dados: pares (rótulo normalizado da coluna, célula).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
    line: usize,
}

impl RawRow {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        let cells = cells.into_iter().map(|(label, value)| (fold_label(&label), value)).collect();
        Self { cells, line: 0 }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Linha de origem no arquivo (1 = primeira linha). 0 se desconhecida.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Primeira célula não vazia entre os rótulos aceitos (já normalizados).
    pub fn get_any(&self, labels: &[&str]) -> Option<&CellValue> {
        labels.iter().find_map(|wanted| {
            self.cells
                .iter()
                .find(|(label, value)| label == wanted && !value.is_blank())
                .map(|(_, value)| value)
        })
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_blank())
    }
}

// --- Leitura ---

/// Lê a primeira aba do arquivo e devolve as linhas de dados (sem o
/// cabeçalho e sem linhas em branco).
pub fn read_rows(bytes: &[u8]) -> Result<Vec<RawRow>, AppError> {
    if bytes.is_empty() {
        return Err(AppError::InvalidFile("arquivo vazio".into()));
    }

    let grid = if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        read_workbook(bytes)?
    } else {
        read_csv(bytes)?
    };

    rows_from_grid(grid)
}

// Linhas do arquivo com o número da linha de origem (base 1)
type Grid = Vec<(usize, Vec<CellValue>)>;

fn read_workbook(bytes: &[u8]) -> Result<Grid, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::InvalidFile(e.to_string()))?;

    let first_sheet = workbook.sheet_names().first().cloned().ok_or(AppError::EmptySheet)?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| AppError::InvalidFile(e.to_string()))?;

    // O range começa na primeira célula usada, não necessariamente em A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    Ok(range
        .rows()
        .enumerate()
        .map(|(i, row)| (first_row + i + 1, row.iter().map(cell_from_data).collect()))
        .collect())
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // as_datetime respeita o sistema 1904 e o falso 29/02/1900
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|datetime| CellValue::Date(datetime.date()))
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        _ => CellValue::Empty,
    }
}

/// Texto do CSV: UTF-8 ou, se não for, Windows-1252 (padrão do Excel em pt-BR).
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn read_csv(bytes: &[u8]) -> Result<Grid, AppError> {
    let text = decode_text(bytes);
    if text.contains('\0') {
        return Err(AppError::InvalidFile("formato não reconhecido".into()));
    }
    let text = text.trim_start_matches('\u{feff}');

    let header_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delimiter = if header_line.matches(';').count() > header_line.matches(',').count() {
        b';'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| AppError::InvalidFile(e.to_string()))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(index + 1);
        grid.push((
            line,
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        ));
    }
    Ok(grid)
}

fn rows_from_grid(grid: Grid) -> Result<Vec<RawRow>, AppError> {
    let mut lines = grid.into_iter().filter(|(_, cells)| !cells.iter().all(CellValue::is_blank));

    // Primeira linha preenchida = cabeçalho
    let header: Vec<String> = match lines.next() {
        Some((_, cells)) => cells.iter().map(|c| c.as_text().unwrap_or_default()).collect(),
        None => return Err(AppError::NoData),
    };

    let rows: Vec<RawRow> = lines
        .map(|(line, cells)| {
            RawRow::new(
                header
                    .iter()
                    .cloned()
                    .zip(cells.into_iter().chain(std::iter::repeat(CellValue::Empty)))
                    .collect(),
            )
            .at_line(line)
        })
        .collect();

    if rows.is_empty() {
        return Err(AppError::NoData);
    }
    Ok(rows)
}
