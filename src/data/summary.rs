//! 数据集统计摘要

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dataset::UnlabelledData;
use super::ranges::MinMax;

/// 数据集的统计摘要（可序列化为 JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub description: String,
    pub num_dimensions: usize,
    pub num_samples: usize,
    pub ranges: Vec<MinMax>,
}

impl DatasetSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl UnlabelledData {
    /// 导出统计摘要
    ///
    /// # 示例
    /// ```ignore
    /// println!("{}", data.summary().to_json()?);
    /// ```
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            num_dimensions: self.num_dimensions,
            num_samples: self.samples.len(),
            ranges: self.ranges().to_vec(),
        }
    }
}

impl fmt::Display for UnlabelledData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DatasetName:\t{}", self.name)?;
        writeln!(f, "DatasetInfo:\t{}", self.description)?;
        writeln!(f, "NumberOfDimensions:\t{}", self.num_dimensions)?;
        writeln!(f, "NumberOfSamples:\t{}", self.samples.len())?;
        writeln!(f, "Dataset Ranges:")?;
        for (j, range) in self.ranges().iter().enumerate() {
            writeln!(f, "[{}] Min:\t{}\tMax:\t{}", j + 1, range.min, range.max)?;
        }
        Ok(())
    }
}
