//! 数据集模块
//!
//! 提供无标签特征向量数据集的存储、统计、划分和读写功能。
//!
//! # 主要组件
//!
//! - [`UnlabelledData`]: 固定维度样本的有序集合及其元数据
//! - [`MinMax`]: 单个维度的取值范围
//! - [`PartitionPlan`] / [`KFoldSplit`]: 随机划分与 K 折交叉验证
//! - [`DatasetFormat`]: 结构化文本格式与 CSV
//! - [`DatasetSummary`]: 可序列化的统计摘要
//! - [`DataError`]: 数据集错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use unlabelled_data::data::{UnlabelledData, seeded_rng};
//!
//! let mut data = UnlabelledData::new().with_name("DummyData").with_num_dimensions(3)?;
//! data.add_sample(vec![0.1, 0.2, 0.3])?;
//! data.save("TrainingData.udata")?;
//!
//! let mut rng = seeded_rng(Some(42));
//! let test = data.partition(80, &mut rng)?;
//! data.merge(&test)?;
//! ```

mod csv_format;
mod dataset;
pub mod error;
pub mod file_format;
pub mod ranges;
pub mod split;
mod summary;

#[cfg(test)]
mod tests;

// Re-exports
pub use dataset::UnlabelledData;
pub use error::DataError;
pub use file_format::{DatasetFormat, FILE_FORMAT_HEADER};
pub use ranges::{MinMax, scale_value};
pub use split::{KFoldSplit, PartitionPlan, seeded_rng};
pub use summary::DatasetSummary;
