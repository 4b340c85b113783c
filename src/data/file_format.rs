//! 数据集结构化文本格式的保存/加载
//!
//! 文件布局：
//! ```text
//! UNLABELLED_DATA_FILE_V1.0
//! DatasetName: <名称>
//! InfoText: <描述，可为空>
//! NumDimensions: <维度>
//! TotalNumSamples: <样本数>
//! <每行一个样本，维度个数值以空白分隔>
//! ```
//!
//! 首行是格式版本标识，不认识的标识一律拒绝加载。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use super::dataset::UnlabelledData;
use super::error::DataError;

/// 文件格式版本标识
pub const FILE_FORMAT_HEADER: &str = "UNLABELLED_DATA_FILE_V1.0";

const NAME_KEY: &str = "DatasetName:";
const INFO_KEY: &str = "InfoText:";
const DIMENSIONS_KEY: &str = "NumDimensions:";
const SAMPLES_KEY: &str = "TotalNumSamples:";

/// 数据集文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetFormat {
    /// 带元数据的结构化文本格式（默认）
    #[default]
    Structured,
    /// 无表头、无元数据的 CSV
    Csv,
}

impl DatasetFormat {
    /// 获取文件扩展名（不含点号）
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Structured => "udata",
            Self::Csv => "csv",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "udata" => Some(Self::Structured),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// 根据路径扩展名选择格式，无法识别时使用结构化格式
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

impl UnlabelledData {
    /// 按扩展名选择格式保存（`.csv` → CSV，其余 → 结构化格式）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        match DatasetFormat::from_path(path) {
            DatasetFormat::Structured => self.save_to_file(path),
            DatasetFormat::Csv => self.save_to_csv(path),
        }
    }

    /// 按扩展名选择格式加载
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        match DatasetFormat::from_path(path) {
            DatasetFormat::Structured => self.load_from_file(path),
            DatasetFormat::Csv => self.load_from_csv(path),
        }
    }

    /// 保存为结构化文本格式
    ///
    /// 名称或描述中含换行符时无法表示，返回 `FormatError`，不会创建文件。
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        for (field, value) in [("名称", &self.name), ("描述", &self.description)] {
            if value.contains(['\n', '\r']) {
                return Err(DataError::FormatError(format!("{field}中不能包含换行符")));
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{FILE_FORMAT_HEADER}")?;
        writeln!(writer, "{NAME_KEY} {}", self.name)?;
        writeln!(writer, "{INFO_KEY} {}", self.description)?;
        writeln!(writer, "{DIMENSIONS_KEY} {}", self.num_dimensions)?;
        writeln!(writer, "{SAMPLES_KEY} {}", self.samples.len())?;
        for sample in &self.samples {
            for (j, value) in sample.iter().enumerate() {
                if j > 0 {
                    writer.write_all(b" ")?;
                }
                write!(writer, "{value}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;

        info!(path = %path.display(), num_samples = self.samples.len(), "保存数据集");
        Ok(())
    }

    /// 从结构化文本格式加载，成功后完全替换当前内容
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DataError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes)
            .map_err(|_| DataError::FormatError("文件不是有效的 UTF-8 文本".to_string()))?;

        let loaded = parse_structured(&content).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "加载数据集失败");
        })?;
        info!(
            path = %path.display(),
            name = %loaded.name,
            num_samples = loaded.samples.len(),
            "加载数据集"
        );
        *self = loaded;
        Ok(())
    }
}

/// 解析结构化文本格式
pub(super) fn parse_structured(content: &str) -> Result<UnlabelledData, DataError> {
    let mut lines = content.lines();
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| DataError::FormatError(format!("文件被截断：缺少{what}")))
    };

    let header = next_line("格式标识")?;
    if header.trim_end() != FILE_FORMAT_HEADER {
        return Err(DataError::FormatError(format!(
            "未知的格式标识: {header:?}"
        )));
    }
    let name = header_value(next_line(NAME_KEY)?, NAME_KEY)?.to_string();
    let description = header_value(next_line(INFO_KEY)?, INFO_KEY)?.to_string();
    let num_dimensions = header_count(next_line(DIMENSIONS_KEY)?, DIMENSIONS_KEY)?;
    let num_samples = header_count(next_line(SAMPLES_KEY)?, SAMPLES_KEY)?;

    if num_samples > 0 && num_dimensions == 0 {
        return Err(DataError::FormatError(
            "有样本时 NumDimensions 不能为 0".to_string(),
        ));
    }

    // TotalNumSamples 来自文件，预分配不能超过实际行数
    let mut samples = Vec::with_capacity(num_samples.min(content.lines().count()));
    for row in 0..num_samples {
        let line = next_line("样本数据")?;
        let sample = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    DataError::FormatError(format!("第 {} 个样本含非数值: {token:?}", row + 1))
                })
            })
            .collect::<Result<Vec<f64>, DataError>>()?;
        if sample.len() != num_dimensions {
            return Err(DataError::FormatError(format!(
                "第 {} 个样本有 {} 个值，期望 {num_dimensions} 个",
                row + 1,
                sample.len()
            )));
        }
        samples.push(sample);
    }

    // 尾部只允许空行
    if lines.any(|line| !line.trim().is_empty()) {
        return Err(DataError::FormatError(format!(
            "数据行数多于 TotalNumSamples ({num_samples})"
        )));
    }

    Ok(UnlabelledData {
        name,
        description,
        num_dimensions,
        samples,
        ..Default::default()
    })
}

/// 取出 `key` 之后的内容（去掉紧随其后的一个空格）
fn header_value<'a>(line: &'a str, key: &str) -> Result<&'a str, DataError> {
    let rest = line
        .strip_prefix(key)
        .ok_or_else(|| DataError::FormatError(format!("期望以 {key} 开头，实际为 {line:?}")))?;
    Ok(rest.strip_prefix(' ').unwrap_or(rest))
}

fn header_count(line: &str, key: &str) -> Result<usize, DataError> {
    let value = header_value(line, key)?.trim();
    value
        .parse()
        .map_err(|_| DataError::FormatError(format!("{key} 必须是非负整数，实际为 {value:?}")))
}
