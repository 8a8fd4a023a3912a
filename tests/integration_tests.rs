//! Integration tests for the strata library
//!
//! These tests verify end-to-end holdout validation across the loaders,
//! the splitter and the bundled classifiers.

use approx::assert_relative_eq;
use std::collections::HashSet;
use std::io::Write;
use strata::api::{quick, ClassifierKind};
use strata::{
    CSVDataset, Classifier, Dataset, HoldoutValidation, LabelPolicy, LabeledData, LibSVMDataset,
    MajorityClassifier, NearestCentroid, Result, StrataError,
};
use tempfile::NamedTempFile;

/// Classifier recording what it was given
#[derive(Default)]
struct Recorder {
    train_calls: usize,
    predict_calls: std::cell::Cell<usize>,
    training_labels: Vec<i32>,
    prediction: i32,
}

impl Classifier for Recorder {
    fn train(&mut self, _samples: &[Vec<f64>], labels: &[i32]) -> Result<()> {
        self.train_calls += 1;
        self.training_labels = labels.to_vec();
        Ok(())
    }

    fn predict(&self, _sample: &[f64]) -> Result<i32> {
        assert!(self.train_calls > 0, "predict called before train");
        self.predict_calls.set(self.predict_calls.get() + 1);
        Ok(self.prediction)
    }
}

/// Deterministic pseudo-random labels over `n_classes`
fn labels_for(n: usize, n_classes: i32, seed: u64) -> Vec<i32> {
    let mut state = seed;
    let mut labels: Vec<i32> = (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % n_classes as u64) as i32
        })
        .collect();
    // Make sure every class is present so the labels stay dense
    for c in 0..n_classes.min(n as i32) {
        labels[c as usize] = c;
    }
    labels
}

#[test]
fn test_partition_properties_across_ratios() {
    // Ratios as whole percentages so the expected quota is integer arithmetic
    let percents = [10usize, 25, 29, 33, 50, 57, 58, 66, 75, 90, 100];

    for (seed, n) in [(1u64, 7usize), (2, 30), (3, 101), (4, 250)] {
        let labels = labels_for(n, 4, seed);

        for &percent in &percents {
            let ratio = percent as f64 / 100.0;
            let holdout = HoldoutValidation::new(ratio).unwrap();
            let partition = holdout.partition(&labels).unwrap();

            // Completeness and disjointness
            let training: HashSet<usize> = partition.training.iter().copied().collect();
            let validation: HashSet<usize> = partition.validation.iter().copied().collect();
            assert!(training.is_disjoint(&validation));
            assert_eq!(training.len() + validation.len(), n);
            assert!((0..n).all(|i| training.contains(&i) || validation.contains(&i)));

            // Order preservation
            assert!(partition.training.windows(2).all(|w| w[0] < w[1]));
            assert!(partition.validation.windows(2).all(|w| w[0] < w[1]));

            // Exact stratification bound
            for class in 0..4 {
                let count = labels.iter().filter(|&&l| l == class).count();
                let trained = partition
                    .training
                    .iter()
                    .filter(|&&i| labels[i] == class)
                    .count();
                assert_eq!(
                    trained,
                    count * percent / 100,
                    "class {class}, ratio {ratio}, n {n}"
                );
            }

            // Training examples are the first occurrences of each class
            for &i in &partition.validation {
                assert!(partition
                    .training
                    .iter()
                    .filter(|&&t| labels[t] == labels[i])
                    .all(|&t| t < i));
            }
        }
    }
}

#[test]
fn test_single_class_boundary() {
    let samples: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
    let labels = vec![0; 10];
    let holdout = HoldoutValidation::new(0.66).unwrap();

    let mut recorder = Recorder {
        prediction: 0,
        ..Default::default()
    };
    let report = holdout.evaluate(&mut recorder, &samples, &labels).unwrap();

    assert_eq!(report.partition.training, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(report.partition.validation, vec![6, 7, 8, 9]);
    assert_eq!(recorder.train_calls, 1);
    assert_eq!(recorder.training_labels.len(), 6);
    assert_eq!(recorder.predict_calls.get(), 4);
    assert_relative_eq!(report.accuracy, 1.0);
}

#[test]
fn test_end_to_end_six_labels() {
    let samples = vec![
        vec![0.0],
        vec![0.1],
        vec![0.2],
        vec![1.0],
        vec![1.1],
        vec![1.2],
    ];
    let labels = vec![0, 0, 0, 1, 1, 1];

    // floor(3 * 0.67) == 2 for both classes
    let holdout = HoldoutValidation::new(0.67).unwrap();
    let report = holdout
        .evaluate(&mut NearestCentroid::new(), &samples, &labels)
        .unwrap();

    assert_eq!(report.classes[0].quota, 2);
    assert_eq!(report.classes[1].quota, 2);
    assert_eq!(report.partition.training, vec![0, 1, 3, 4]);
    assert_eq!(report.partition.validation, vec![2, 5]);
    assert_relative_eq!(report.accuracy, 1.0);
}

#[test]
fn test_degenerate_ratio() {
    let samples = vec![vec![0.0]; 4];
    let labels = vec![0, 1, 0, 1];
    let holdout = HoldoutValidation::new(1.0).unwrap();

    let mut recorder = Recorder::default();
    let result = holdout.compute(&mut recorder, &samples, &labels);
    assert!(matches!(result, Err(StrataError::EmptyValidationSet)));
    assert_eq!(recorder.train_calls, 0);
}

#[test]
fn test_tiny_class_goes_to_validation() {
    let samples: Vec<Vec<f64>> = (0..7).map(|i| vec![i as f64]).collect();
    let labels = vec![0, 0, 1, 0, 0, 2, 2];
    let holdout = HoldoutValidation::new(0.5).unwrap();

    let mut recorder = Recorder::default();
    let report = holdout.evaluate(&mut recorder, &samples, &labels).unwrap();

    assert_eq!(report.zero_quota_classes(), vec![1]);
    assert!(report.partition.validation.contains(&2));
    assert_eq!(recorder.training_labels, vec![0, 0, 2]);
}

#[test]
fn test_accuracy_bounds_and_determinism() {
    let labels = labels_for(60, 3, 7);
    let samples: Vec<Vec<f64>> = labels
        .iter()
        .enumerate()
        .map(|(i, &l)| vec![l as f64 * 3.0 + (i % 5) as f64 * 0.5, (i % 3) as f64])
        .collect();

    for kind in [
        ClassifierKind::Majority,
        ClassifierKind::NearestCentroid,
        ClassifierKind::Knn { k: 3 },
    ] {
        let holdout = HoldoutValidation::new(0.6).unwrap();
        let first = holdout
            .evaluate(&mut kind.build().unwrap(), &samples, &labels)
            .unwrap();
        let second = holdout
            .evaluate(&mut kind.build().unwrap(), &samples, &labels)
            .unwrap();

        assert!((0.0..=1.0).contains(&first.accuracy));
        assert_eq!(first, second, "{kind} is not deterministic");
    }
}

#[test]
fn test_input_validation_errors() {
    let holdout = HoldoutValidation::default();
    let mut classifier = MajorityClassifier::new();

    let result = holdout.compute(&mut classifier, &[vec![0.0]], &[0, 1]);
    assert!(matches!(result, Err(StrataError::DimensionMismatch { .. })));

    let samples = vec![vec![0.0]; 4];
    let result = holdout.compute(&mut classifier, &samples, &[0, 1, 3, 1]);
    assert!(matches!(result, Err(StrataError::InvalidLabel { label: 3, .. })));

    let result = holdout.compute(&mut classifier, &samples, &[0, -2, 0, 1]);
    assert!(matches!(result, Err(StrataError::InvalidLabel { label: -2, .. })));

    let sparse = holdout.with_label_policy(LabelPolicy::Sparse);
    let samples = vec![vec![0.0]; 6];
    let accuracy = sparse
        .compute(&mut classifier, &samples, &[5, 5, 5, 9, 9, 9])
        .unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[test]
fn test_csv_workflow() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(temp_file, "sepal,petal,species").expect("Failed to write");
    for i in 0..6 {
        let jitter = i as f64 * 0.05;
        writeln!(temp_file, "{},{},setosa", 5.0 + jitter, 1.4 + jitter).expect("Failed to write");
        writeln!(temp_file, "{},{},versicolor", 6.5 + jitter, 4.5 + jitter)
            .expect("Failed to write");
        writeln!(temp_file, "{},{},virginica", 7.5 + jitter, 6.0 + jitter)
            .expect("Failed to write");
    }
    temp_file.flush().expect("Failed to flush");

    let dataset = CSVDataset::from_file(temp_file.path()).expect("Failed to load dataset");
    assert_eq!(dataset.len(), 18);
    assert_eq!(dataset.class_names(), &["setosa", "versicolor", "virginica"]);

    let holdout = HoldoutValidation::new(0.5).unwrap();
    let accuracy = holdout
        .compute_dataset(&mut NearestCentroid::new(), &dataset)
        .expect("Holdout should succeed");
    assert_relative_eq!(accuracy, 1.0);

    let report = quick::holdout_csv(temp_file.path(), 0.5, ClassifierKind::Majority)
        .expect("Holdout should succeed");
    assert_eq!(report.partition.validation.len(), 9);
    // Majority of a balanced training set is the smallest label
    assert_eq!(report.correct, 3);
}

#[test]
fn test_libsvm_workflow() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    for _ in 0..4 {
        writeln!(temp_file, "+1 1:2.0 2:1.0").expect("Failed to write");
        writeln!(temp_file, "-1 1:-2.0 2:-1.0").expect("Failed to write");
    }
    temp_file.flush().expect("Failed to flush");

    // Raw -1 labels are not valid class indices
    let raw = LibSVMDataset::from_file(temp_file.path()).unwrap();
    let result = HoldoutValidation::default().compute_dataset(&mut MajorityClassifier::new(), &raw);
    assert!(matches!(result, Err(StrataError::InvalidLabel { .. })));

    let encoded = raw.encode_labels().unwrap();
    let accuracy = HoldoutValidation::new(0.5)
        .unwrap()
        .compute_dataset(&mut NearestCentroid::new(), &encoded)
        .unwrap();
    assert_relative_eq!(accuracy, 1.0);
}

#[test]
fn test_labeled_data_as_dataset() {
    let data = LabeledData::new(
        vec![vec![0.0], vec![0.1], vec![5.0], vec![5.1]],
        vec![0, 0, 1, 1],
    )
    .unwrap();
    let report = HoldoutValidation::new(0.5)
        .unwrap()
        .evaluate_dataset(&mut NearestCentroid::new(), &data)
        .unwrap();
    assert_eq!(report.partition.training, vec![0, 2]);
    assert_eq!(report.correct, 2);
}
