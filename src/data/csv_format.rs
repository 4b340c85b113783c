//! CSV 格式的保存/加载
//!
//! 每行一个样本，字段以逗号分隔，无表头、无元数据。
//! 名称和描述不会写入 CSV，经 CSV 往返后会丢失。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use super::dataset::UnlabelledData;
use super::error::DataError;

impl UnlabelledData {
    /// 保存为 CSV
    pub fn save_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        for sample in &self.samples {
            writer.write_record(sample.iter().map(f64::to_string))?;
        }
        writer.flush()?;

        info!(path = %path.display(), num_samples = self.samples.len(), "保存 CSV");
        Ok(())
    }

    /// 从 CSV 加载，维度由第一行的字段数确定
    ///
    /// 成功后完全替换当前内容（名称、描述置空）。
    pub fn load_from_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(File::open(path)?));

        let mut num_dimensions = 0;
        let mut samples = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            let sample = record
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    field.parse::<f64>().map_err(|_| {
                        DataError::FormatError(format!(
                            "第 {line} 行第 {} 列不是数值: {field:?}",
                            col + 1
                        ))
                    })
                })
                .collect::<Result<Vec<f64>, DataError>>()?;

            if num_dimensions == 0 {
                num_dimensions = sample.len();
            } else if sample.len() != num_dimensions {
                return Err(DataError::FormatError(format!(
                    "第 {line} 行有 {} 列，期望 {num_dimensions} 列",
                    sample.len()
                )));
            }
            samples.push(sample);
        }

        info!(path = %path.display(), num_samples = samples.len(), num_dimensions, "加载 CSV");
        *self = UnlabelledData {
            num_dimensions,
            samples,
            ..Default::default()
        };
        Ok(())
    }
}
