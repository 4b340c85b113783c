//! 随机划分与 K 折交叉验证单元测试

use super::{make_dataset, sorted_samples};
use crate::data::{DataError, UnlabelledData, seeded_rng};

#[test]
fn test_partition_80_20() {
    let mut data = make_dataset(100, 3);
    let original = sorted_samples(&data);

    let test = data.partition(80, &mut seeded_rng(Some(42))).unwrap();
    assert_eq!(data.num_samples(), 80);
    assert_eq!(test.num_samples(), 20);
    assert_eq!(test.num_dimensions(), 3);
    assert_eq!(test.name(), data.name());

    // 两部分合起来恰好是原数据
    let mut merged = data.clone();
    merged.merge(&test).unwrap();
    assert_eq!(merged.num_samples(), 100);
    assert_eq!(sorted_samples(&merged), original);
}

#[test]
fn test_partition_rounding() {
    // 7 * 50% = 3.5 → 4
    let mut data = make_dataset(7, 1);
    let test = data.partition(50, &mut seeded_rng(Some(0))).unwrap();
    assert_eq!(data.num_samples(), 4);
    assert_eq!(test.num_samples(), 3);
}

#[test]
fn test_partition_boundaries() {
    let mut data = make_dataset(10, 2);
    let original = sorted_samples(&data);
    let test = data.partition(0, &mut seeded_rng(Some(1))).unwrap();
    assert!(data.is_empty(), "0% 时训练集应为空");
    assert_eq!(sorted_samples(&test), original);

    let mut data = make_dataset(10, 2);
    let test = data.partition(100, &mut seeded_rng(Some(1))).unwrap();
    assert_eq!(data.num_samples(), 10);
    assert!(test.is_empty(), "100% 时测试集应为空");
    assert_eq!(test.num_dimensions(), 2);

    let mut empty = UnlabelledData::new().with_num_dimensions(2).unwrap();
    let test = empty.partition(50, &mut seeded_rng(Some(1))).unwrap();
    assert!(empty.is_empty());
    assert!(test.is_empty());
}

#[test]
fn test_partition_invalid_percentage() {
    let mut data = make_dataset(10, 2);
    let before = data.samples().to_vec();
    assert!(matches!(
        data.partition(101, &mut seeded_rng(Some(1))),
        Err(DataError::InvalidArgument(_))
    ));
    assert_eq!(data.samples(), before.as_slice());
}

#[test]
fn test_partition_is_reproducible_with_seed() {
    let data = make_dataset(50, 2);

    let mut a = data.clone();
    let mut b = data.clone();
    let test_a = a.partition(70, &mut seeded_rng(Some(7))).unwrap();
    let test_b = b.partition(70, &mut seeded_rng(Some(7))).unwrap();
    assert_eq!(a.samples(), b.samples());
    assert_eq!(test_a.samples(), test_b.samples());
}

#[test]
fn test_partition_plan_then_apply() {
    let mut data = make_dataset(10, 1);
    let plan = data.partition_indices(60, &mut seeded_rng(Some(5))).unwrap();
    assert_eq!(plan.training().len(), 6);
    assert_eq!(plan.test().len(), 4);
    // 计算方案不修改数据集
    assert_eq!(data.num_samples(), 10);

    let expected_training: Vec<Vec<f64>> = plan
        .training()
        .iter()
        .map(|&i| data[i].to_vec())
        .collect();
    let expected_test: Vec<Vec<f64>> = plan.test().iter().map(|&i| data[i].to_vec()).collect();

    let test = data.apply_partition(plan).unwrap();
    assert_eq!(data.samples(), expected_training.as_slice(), "应保持随机抽取顺序");
    assert_eq!(test.samples(), expected_test.as_slice());
}

#[test]
fn test_apply_stale_plan_is_rejected() {
    let mut data = make_dataset(10, 1);
    let plan = data.partition_indices(50, &mut seeded_rng(Some(5))).unwrap();
    data.remove_last_sample();

    assert!(matches!(
        data.apply_partition(plan),
        Err(DataError::StateConflict(_))
    ));
    assert_eq!(data.num_samples(), 9);
}

#[test]
fn test_partition_invalidates_folds() {
    let mut data = make_dataset(10, 1);
    let mut rng = seeded_rng(Some(9));
    data.split_into_k_folds(2, &mut rng).unwrap();
    data.partition(50, &mut rng).unwrap();
    assert!(data.k_fold_split().is_none());
}

#[test]
fn test_k_fold_sizes_and_coverage() {
    let mut data = make_dataset(100, 3);
    let original = sorted_samples(&data);
    data.split_into_k_folds(10, &mut seeded_rng(Some(42))).unwrap();

    let split = data.k_fold_split().unwrap();
    assert_eq!(split.num_folds(), 10);
    assert_eq!(split.fold_sizes(), vec![10; 10]);

    let mut all_test = UnlabelledData::new().with_num_dimensions(3).unwrap();
    for fold in 0..10 {
        let training = data.training_fold_data(fold).unwrap();
        let test = data.test_fold_data(fold).unwrap();
        assert_eq!(training.num_samples(), 90);
        assert_eq!(test.num_samples(), 10);

        let mut union = training.clone();
        union.merge(&test).unwrap();
        assert_eq!(sorted_samples(&union), original);

        all_test.merge(&test).unwrap();
    }
    // 各折测试集两两不相交且覆盖全部样本
    assert_eq!(sorted_samples(&all_test), original);
    // 提取不修改源数据集
    assert_eq!(data.num_samples(), 100);
    assert!(data.k_fold_split().is_some());
}

#[test]
fn test_k_fold_uneven_sizes() {
    let mut data = make_dataset(11, 1);
    data.split_into_k_folds(3, &mut seeded_rng(Some(3))).unwrap();

    let sizes = data.k_fold_split().unwrap().fold_sizes();
    assert_eq!(sizes.iter().sum::<usize>(), 11);
    let max = sizes.iter().max().unwrap();
    let min = sizes.iter().min().unwrap();
    assert!(max - min <= 1, "各折大小至多相差 1: {sizes:?}");
    assert!(sizes.iter().all(|&s| s > 0));

    let split = data.k_fold_split().unwrap();
    for i in 0..11 {
        assert!(split.fold_of(i).unwrap() < 3);
    }
    assert_eq!(split.fold_of(11), None);
}

#[test]
fn test_k_fold_single_fold() {
    let mut data = make_dataset(5, 1);
    data.split_into_k_folds(1, &mut seeded_rng(Some(3))).unwrap();
    assert_eq!(data.test_fold_data(0).unwrap().num_samples(), 5);
    assert!(data.training_fold_data(0).unwrap().is_empty());
}

#[test]
fn test_k_fold_errors() {
    let mut data = make_dataset(5, 1);
    let mut rng = seeded_rng(Some(3));

    assert!(matches!(
        data.training_fold_data(0),
        Err(DataError::StateConflict(_))
    ));
    assert!(matches!(
        data.split_into_k_folds(0, &mut rng),
        Err(DataError::InvalidArgument(_))
    ));
    assert!(matches!(
        data.split_into_k_folds(6, &mut rng),
        Err(DataError::InsufficientData {
            required: 6,
            available: 5
        })
    ));
    assert!(data.k_fold_split().is_none());

    data.split_into_k_folds(5, &mut rng).unwrap();
    assert!(matches!(
        data.test_fold_data(5),
        Err(DataError::IndexOutOfBounds { index: 5, len: 5 })
    ));
}

#[test]
fn test_k_fold_is_reproducible_with_seed() {
    let mut a = make_dataset(30, 2);
    let mut b = make_dataset(30, 2);
    a.split_into_k_folds(4, &mut seeded_rng(Some(11))).unwrap();
    b.split_into_k_folds(4, &mut seeded_rng(Some(11))).unwrap();
    assert_eq!(a.k_fold_split(), b.k_fold_split());
    for fold in 0..4 {
        assert_eq!(
            a.test_fold_data(fold).unwrap().samples(),
            b.test_fold_data(fold).unwrap().samples()
        );
    }
}
