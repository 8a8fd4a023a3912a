//! Reference classifiers implementing the `Classifier` trait

pub mod knn;
pub mod majority;
pub mod nearest_centroid;

pub use self::knn::KNearestNeighbors;
pub use self::majority::MajorityClassifier;
pub use self::nearest_centroid::NearestCentroid;
