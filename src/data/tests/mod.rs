//! data 模块单元测试

mod split;

use crate::data::UnlabelledData;

/// 构造 `n` 个 `dims` 维样本，第 i 个样本各分量为 `i * 10 + j`
pub(super) fn make_dataset(n: usize, dims: usize) -> UnlabelledData {
    let mut data = UnlabelledData::new()
        .with_name("TestData")
        .with_description("测试用数据")
        .with_num_dimensions(dims)
        .expect("设置维度失败");
    for i in 0..n {
        let sample: Vec<f64> = (0..dims).map(|j| (i * 10 + j) as f64).collect();
        data.add_sample(sample).expect("添加样本失败");
    }
    data
}

/// 按首个分量排序后的样本，用于按多重集比较
pub(super) fn sorted_samples(data: &UnlabelledData) -> Vec<Vec<f64>> {
    let mut samples = data.samples().to_vec();
    samples.sort_by(|a, b| a[0].total_cmp(&b[0]));
    samples
}
