//! 随机划分与 K 折交叉验证
//!
//! 随机源由调用方显式传入，固定种子即可复现划分结果：
//!
//! ```ignore
//! let mut rng = seeded_rng(Some(42));
//! let test = data.partition(80, &mut rng)?;
//!
//! data.split_into_k_folds(10, &mut rng)?;
//! for fold in 0..10 {
//!     let train = data.training_fold_data(fold)?;
//!     let test = data.test_fold_data(fold)?;
//! }
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::dataset::UnlabelledData;
use super::error::DataError;

/// 构造随机源：给定种子时可复现，否则使用系统熵
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// 一次随机划分的索引方案（尚未应用到数据集）
///
/// 两组索引均保持随机抽取的顺序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    training: Vec<usize>,
    test: Vec<usize>,
}

impl PartitionPlan {
    /// 留在原数据集中的样本索引
    pub fn training(&self) -> &[usize] {
        &self.training
    }

    /// 返回给调用方的样本索引
    pub fn test(&self) -> &[usize] {
        &self.test
    }
}

/// K 折划分结果：样本索引 → 折编号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KFoldSplit {
    num_folds: usize,
    assignment: Vec<usize>,
}

impl KFoldSplit {
    pub fn num_folds(&self) -> usize {
        self.num_folds
    }

    /// 第 `sample_index` 个样本所属的折
    pub fn fold_of(&self, sample_index: usize) -> Option<usize> {
        self.assignment.get(sample_index).copied()
    }

    /// 每折的样本数
    pub fn fold_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_folds];
        for &fold in &self.assignment {
            sizes[fold] += 1;
        }
        sizes
    }

    fn check_fold(&self, fold: usize) -> Result<(), DataError> {
        if fold >= self.num_folds {
            return Err(DataError::IndexOutOfBounds {
                index: fold,
                len: self.num_folds,
            });
        }
        Ok(())
    }
}

fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

impl UnlabelledData {
    // ========== 随机划分 ==========

    /// 计算划分方案但不修改数据集
    ///
    /// 训练集大小为 `round(样本数 * training_percentage / 100)`。
    pub fn partition_indices<R: Rng + ?Sized>(
        &self,
        training_percentage: u32,
        rng: &mut R,
    ) -> Result<PartitionPlan, DataError> {
        if training_percentage > 100 {
            return Err(DataError::InvalidArgument(format!(
                "训练集百分比必须在 0 到 100 之间，实际为 {training_percentage}"
            )));
        }
        let len = self.samples.len();
        let num_training =
            ((len as f64 * f64::from(training_percentage) / 100.0).round() as usize).min(len);

        let mut training = shuffled_indices(len, rng);
        let test = training.split_off(num_training);
        Ok(PartitionPlan { training, test })
    }

    /// 应用划分方案：本数据集只保留训练部分，测试部分作为新数据集返回
    ///
    /// 方案必须恰好覆盖当前每个样本一次，否则返回 `StateConflict` 且不做修改。
    pub fn apply_partition(&mut self, plan: PartitionPlan) -> Result<UnlabelledData, DataError> {
        let len = self.samples.len();
        let mut seen = vec![false; len];
        for &index in plan.training.iter().chain(&plan.test) {
            if index >= len || seen[index] {
                return Err(DataError::StateConflict(
                    "划分方案与当前样本不一致".to_string(),
                ));
            }
            seen[index] = true;
        }
        if seen.iter().any(|&s| !s) {
            return Err(DataError::StateConflict(
                "划分方案未覆盖全部样本".to_string(),
            ));
        }

        let mut slots: Vec<Option<Vec<f64>>> = std::mem::take(&mut self.samples)
            .into_iter()
            .map(Some)
            .collect();
        let mut test = self.empty_like();
        test.samples = plan.test.iter().filter_map(|&i| slots[i].take()).collect();
        self.samples = plan
            .training
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        self.invalidate();

        info!(
            name = %self.name,
            training = self.samples.len(),
            test = test.samples.len(),
            "划分数据集"
        );
        Ok(test)
    }

    /// 按百分比随机划分：本数据集保留训练部分，返回测试部分
    ///
    /// - `training_percentage = 0`：本数据集清空样本，返回全部
    /// - `training_percentage = 100`：返回空数据集
    pub fn partition<R: Rng + ?Sized>(
        &mut self,
        training_percentage: u32,
        rng: &mut R,
    ) -> Result<UnlabelledData, DataError> {
        let plan = self.partition_indices(training_percentage, rng)?;
        self.apply_partition(plan)
    }

    // ========== K 折划分 ==========

    /// 把样本随机分成 `k` 折，各折大小至多相差 1
    pub fn split_into_k_folds<R: Rng + ?Sized>(
        &mut self,
        k: usize,
        rng: &mut R,
    ) -> Result<(), DataError> {
        if k < 1 {
            return Err(DataError::InvalidArgument("K 必须至少为 1".to_string()));
        }
        let len = self.samples.len();
        if k > len {
            return Err(DataError::InsufficientData {
                required: k,
                available: len,
            });
        }

        let mut assignment = vec![0; len];
        for (i, index) in shuffled_indices(len, rng).into_iter().enumerate() {
            assignment[index] = i % k;
        }
        self.folds = Some(KFoldSplit {
            num_folds: k,
            assignment,
        });
        debug!(name = %self.name, k, num_samples = len, "K 折划分完成");
        Ok(())
    }

    /// 第 `fold` 折的训练数据：所有不属于该折的样本
    pub fn training_fold_data(&self, fold: usize) -> Result<UnlabelledData, DataError> {
        self.fold_data(fold, false)
    }

    /// 第 `fold` 折的测试数据：只含属于该折的样本
    pub fn test_fold_data(&self, fold: usize) -> Result<UnlabelledData, DataError> {
        self.fold_data(fold, true)
    }

    fn fold_data(&self, fold: usize, in_fold: bool) -> Result<UnlabelledData, DataError> {
        let split = self.folds.as_ref().ok_or_else(|| {
            DataError::StateConflict("尚未进行 K 折划分".to_string())
        })?;
        split.check_fold(fold)?;

        let mut data = self.empty_like();
        data.samples = self
            .samples
            .iter()
            .zip(&split.assignment)
            .filter(|&(_, &f)| (f == fold) == in_fold)
            .map(|(sample, _)| sample.clone())
            .collect();
        Ok(data)
    }
}
