//! # Unlabelled Data
//!
//! 面向机器学习流水线的无标签特征向量数据集容器：
//! 收集样本、保存/恢复、范围统计，以及生成训练/验证划分（随机划分与 K 折交叉验证）。
//!

pub mod data;

pub use data::{DataError, MinMax, UnlabelledData};
