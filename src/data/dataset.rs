//! UnlabelledData - 无标签特征向量数据集
//!
//! 负责样本存储与维度约束：
//! - 维度在添加第一个样本前必须设置，有数据后不可更改（除非 clear）
//! - 任何修改样本的操作都会使范围缓存和 K 折划分失效
//! - 所有操作失败时不修改数据集

use std::cell::OnceCell;
use std::ops::Index;

use ndarray::Array2;
use tracing::{debug, info};

use super::error::DataError;
use super::ranges::MinMax;
use super::split::KFoldSplit;

/// 无标签数据集：有序的等长 `f64` 特征向量及其元数据
///
/// # 示例
/// ```ignore
/// let mut data = UnlabelledData::new()
///     .with_name("DummyData")
///     .with_description("一些随机数据")
///     .with_num_dimensions(3)?;
/// data.add_sample(vec![0.1, -0.4, 0.9])?;
/// assert_eq!(data.num_samples(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnlabelledData {
    /// 数据集名称（不应含空白，由调用方保证）
    pub(super) name: String,
    /// 描述文本，可为空
    pub(super) description: String,
    /// 维度，0 表示尚未设置
    pub(super) num_dimensions: usize,
    pub(super) samples: Vec<Vec<f64>>,
    /// 最近一次 K 折划分的结果
    pub(super) folds: Option<KFoldSplit>,
    /// 范围统计缓存，样本变动时清空
    pub(super) ranges_cache: OnceCell<Vec<MinMax>>,
    pub(super) external_ranges: Option<Vec<MinMax>>,
    pub(super) use_external_ranges: bool,
}

impl UnlabelledData {
    /// 创建一个空的、未设置维度的数据集
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置名称（构建器风格）
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 设置描述（构建器风格）
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 设置维度（构建器风格）
    pub fn with_num_dimensions(mut self, num_dimensions: usize) -> Result<Self, DataError> {
        self.set_num_dimensions(num_dimensions)?;
        Ok(self)
    }

    /// 从二维数组构建数据集，每行为一个样本
    pub fn from_array(array: &Array2<f64>) -> Result<Self, DataError> {
        let mut data = Self::new().with_num_dimensions(array.ncols())?;
        data.samples = array.rows().into_iter().map(|row| row.to_vec()).collect();
        Ok(data)
    }

    // ========== 访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 样本维度，未设置时为 0
    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 全部样本（按当前顺序）
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// 获取第 index 个样本
    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.samples.get(index).map(Vec::as_slice)
    }

    /// 最近一次 K 折划分（样本变动后为 None）
    pub fn k_fold_split(&self) -> Option<&KFoldSplit> {
        self.folds.as_ref()
    }

    // ========== 元数据 ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// 设置样本维度
    ///
    /// - `num_dimensions` 为 0 时返回 `InvalidArgument`
    /// - 已有样本且维度不同时返回 `StateConflict`，需先 `clear()`
    pub fn set_num_dimensions(&mut self, num_dimensions: usize) -> Result<(), DataError> {
        if num_dimensions == 0 {
            return Err(DataError::InvalidArgument("维度必须大于 0".to_string()));
        }
        if num_dimensions == self.num_dimensions {
            return Ok(());
        }
        if !self.samples.is_empty() {
            return Err(DataError::StateConflict(format!(
                "数据集已有 {} 个 {} 维样本，无法改为 {} 维",
                self.samples.len(),
                self.num_dimensions,
                num_dimensions
            )));
        }
        self.num_dimensions = num_dimensions;
        // 外部范围按维度对应，维度变化后不再适用
        self.external_ranges = None;
        self.use_external_ranges = false;
        self.invalidate();
        Ok(())
    }

    // ========== 样本增删 ==========

    /// 追加一个样本，长度必须等于维度
    pub fn add_sample(&mut self, sample: impl Into<Vec<f64>>) -> Result<(), DataError> {
        let sample = sample.into();
        self.check_width(sample.len())?;
        self.samples.push(sample);
        self.invalidate();
        Ok(())
    }

    /// 批量追加样本：任一样本维度不符则一个都不添加
    pub fn add_samples<I>(&mut self, samples: I) -> Result<(), DataError>
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        let samples: Vec<Vec<f64>> = samples.into_iter().collect();
        for sample in &samples {
            self.check_width(sample.len())?;
        }
        if samples.is_empty() {
            return Ok(());
        }
        self.samples.extend(samples);
        self.invalidate();
        Ok(())
    }

    /// 移除并返回最后一个样本
    pub fn remove_last_sample(&mut self) -> Option<Vec<f64>> {
        let removed = self.samples.pop();
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// 预留至少 `additional` 个样本的空间
    pub fn reserve(&mut self, additional: usize) {
        self.samples.reserve(additional);
    }

    /// 清空数据集，回到未设置维度的初始状态
    pub fn clear(&mut self) {
        debug!(name = %self.name, num_samples = self.samples.len(), "清空数据集");
        *self = Self::default();
    }

    /// 将 `other` 的全部样本按顺序追加到本数据集末尾
    ///
    /// 两者维度必须一致，否则返回 `DimensionMismatch` 且都不修改。
    /// 本数据集的名称、描述保持不变。
    pub fn merge(&mut self, other: &UnlabelledData) -> Result<(), DataError> {
        if other.num_dimensions != self.num_dimensions {
            return Err(DataError::DimensionMismatch {
                expected: self.num_dimensions,
                got: other.num_dimensions,
            });
        }
        self.samples.extend(other.samples.iter().cloned());
        self.invalidate();
        info!(
            into = %self.name,
            from = %other.name,
            merged = other.samples.len(),
            total = self.samples.len(),
            "合并数据集"
        );
        Ok(())
    }

    /// 按给定索引复制出一个独立的新数据集（保留名称、描述和维度）
    pub fn subset(&self, indices: &[usize]) -> Result<UnlabelledData, DataError> {
        let len = self.samples.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(DataError::IndexOutOfBounds { index, len });
        }
        let mut data = self.empty_like();
        data.samples = indices.iter().map(|&i| self.samples[i].clone()).collect();
        Ok(data)
    }

    /// 导出为 [样本数, 维度] 的二维数组
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.samples.len(), self.num_dimensions), |(i, j)| {
            self.samples[i][j]
        })
    }

    // ========== 内部辅助 ==========

    /// 样本变动后调用：范围缓存和 K 折划分一并失效
    pub(super) fn invalidate(&mut self) {
        self.ranges_cache.take();
        self.folds = None;
    }

    /// 名称、描述、维度相同但不含样本的新数据集
    pub(super) fn empty_like(&self) -> UnlabelledData {
        UnlabelledData {
            name: self.name.clone(),
            description: self.description.clone(),
            num_dimensions: self.num_dimensions,
            ..Default::default()
        }
    }

    fn check_width(&self, width: usize) -> Result<(), DataError> {
        if self.num_dimensions == 0 || width != self.num_dimensions {
            return Err(DataError::DimensionMismatch {
                expected: self.num_dimensions,
                got: width,
            });
        }
        Ok(())
    }
}

impl Index<usize> for UnlabelledData {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}
