//! 数据集操作错误类型定义

use thiserror::Error;

/// 数据集相关错误
///
/// 所有操作失败时都不会修改接收者的可观察状态。
#[derive(Debug, Error)]
pub enum DataError {
    /// 数值参数超出允许范围
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    /// 样本或数据集维度不匹配
    #[error("维度不匹配: 期望 {expected}, 实际 {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// 操作所需的前置状态不存在（如尚未做 K 折划分）
    #[error("状态冲突: {0}")]
    StateConflict(String),

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 样本数不足以完成请求的操作
    #[error("数据不足: 需要至少 {required} 个样本, 实际 {available} 个")]
    InsufficientData { required: usize, available: usize },

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 格式错误（如文件头不匹配、字段数错误、非数值内容）
    #[error("格式错误: {0}")]
    FormatError(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DataError::IoError(e),
            other => DataError::FormatError(format!("CSV 解析失败: {other:?}")),
        }
    }
}
