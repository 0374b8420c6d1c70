use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::record::DatasetRecord;
use super::DatasetError;

/// Line-delimited JSON dataset writer
pub struct DatasetWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records: usize,
}

impl DatasetWriter {
    /// Create (truncate) the target file, creating parent directories
    pub fn create(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }
        let file = File::create(&path).map_err(|e| DatasetError::io(&path, e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            records: 0,
        })
    }

    pub fn append(&mut self, record: &DatasetRecord) -> Result<(), DatasetError> {
        let json = serde_json::to_string(record).map_err(|e| DatasetError::Json {
            path: self.path.clone(),
            line: self.records + 1,
            source: e,
        })?;
        writeln!(self.writer, "{}", json).map_err(|e| DatasetError::io(&self.path, e))?;
        self.records += 1;
        Ok(())
    }

    /// Flush and return the number of records written
    pub fn finish(mut self) -> Result<usize, DatasetError> {
        self.writer.flush().map_err(|e| DatasetError::io(&self.path, e))?;
        Ok(self.records)
    }
}

/// Read every record of a JSONL dataset, skipping blank lines
pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Vec<DatasetRecord>, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;

    let mut records = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| DatasetError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| DatasetError::Json {
            path: path.to_path_buf(),
            line: i + 1,
            source: e,
        })?;
        records.push(record);
    }

    log::info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}
