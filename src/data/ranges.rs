//! 范围统计与范围缩放
//!
//! - [`UnlabelledData::ranges`]：每个维度的最小/最大值（单次线性扫描，结果缓存到下次样本变动）
//! - [`UnlabelledData::scale`]：按范围把每个维度线性映射到目标区间
//! - 外部范围：用调用方给定的范围代替观测范围进行缩放

use serde::{Deserialize, Serialize};

use super::dataset::UnlabelledData;
use super::error::DataError;

/// 某一维度上观测到的最小值和最大值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 区间宽度 `max - min`
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// 把 `value` 从 `source` 区间线性映射到 `[target_min, target_max]`
///
/// 源区间宽度为 0 时返回 `target_min`。
pub fn scale_value(value: f64, source: MinMax, target_min: f64, target_max: f64) -> f64 {
    if source.span() == 0.0 {
        return target_min;
    }
    (value - source.min) / source.span() * (target_max - target_min) + target_min
}

fn compute_ranges(samples: &[Vec<f64>], num_dimensions: usize) -> Vec<MinMax> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let mut ranges: Vec<MinMax> = first.iter().map(|&v| MinMax::new(v, v)).collect();
    for sample in &samples[1..] {
        for (range, &value) in ranges.iter_mut().zip(sample) {
            range.include(value);
        }
    }
    debug_assert_eq!(ranges.len(), num_dimensions);
    ranges
}

impl UnlabelledData {
    /// 每个维度的 [`MinMax`]；没有样本时返回空切片
    pub fn ranges(&self) -> &[MinMax] {
        self.ranges_cache
            .get_or_init(|| compute_ranges(&self.samples, self.num_dimensions))
    }

    /// 设置外部范围，长度必须等于维度
    pub fn set_external_ranges(
        &mut self,
        ranges: Vec<MinMax>,
        use_external_ranges: bool,
    ) -> Result<(), DataError> {
        if self.num_dimensions == 0 {
            return Err(DataError::StateConflict(
                "设置外部范围前必须先设置维度".to_string(),
            ));
        }
        if ranges.len() != self.num_dimensions {
            return Err(DataError::DimensionMismatch {
                expected: self.num_dimensions,
                got: ranges.len(),
            });
        }
        if let Some(j) = ranges.iter().position(|r| r.min > r.max) {
            return Err(DataError::InvalidArgument(format!(
                "第 {j} 维外部范围的最小值大于最大值"
            )));
        }
        self.external_ranges = Some(ranges);
        self.use_external_ranges = use_external_ranges;
        Ok(())
    }

    /// 启用/停用外部范围缩放；未设置外部范围时不能启用
    pub fn enable_external_range_scaling(&mut self, enable: bool) -> Result<(), DataError> {
        if enable && self.external_ranges.is_none() {
            return Err(DataError::StateConflict("尚未设置外部范围".to_string()));
        }
        self.use_external_ranges = enable;
        Ok(())
    }

    pub fn external_ranges(&self) -> Option<&[MinMax]> {
        self.external_ranges.as_deref()
    }

    pub fn uses_external_ranges(&self) -> bool {
        self.use_external_ranges
    }

    /// 将所有样本按维度缩放到 `[target_min, target_max]`
    ///
    /// 启用外部范围时使用外部范围，否则使用观测范围。
    pub fn scale(&mut self, target_min: f64, target_max: f64) -> Result<(), DataError> {
        let ranges = match (&self.external_ranges, self.use_external_ranges) {
            (Some(external), true) => external.clone(),
            _ => self.ranges().to_vec(),
        };
        self.scale_with_ranges(&ranges, target_min, target_max)
    }

    /// 使用给定范围把所有样本缩放到 `[target_min, target_max]`
    pub fn scale_with_ranges(
        &mut self,
        ranges: &[MinMax],
        target_min: f64,
        target_max: f64,
    ) -> Result<(), DataError> {
        if target_min.is_nan() || target_max.is_nan() || target_min >= target_max {
            return Err(DataError::InvalidArgument(format!(
                "目标区间无效: [{target_min}, {target_max}]"
            )));
        }
        if self.samples.is_empty() {
            return Ok(());
        }
        if ranges.len() != self.num_dimensions {
            return Err(DataError::DimensionMismatch {
                expected: self.num_dimensions,
                got: ranges.len(),
            });
        }

        for sample in &mut self.samples {
            for (value, &range) in sample.iter_mut().zip(ranges) {
                *value = scale_value(*value, range, target_min, target_max);
            }
        }
        // 样本顺序和数量不变，K 折划分仍然有效
        self.ranges_cache.take();
        Ok(())
    }
}
