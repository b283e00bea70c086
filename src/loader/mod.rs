//! Building the support-matrix snapshot from its source files.
//!
//! The data set is split into one feature catalog and any number of vendor
//! partitions. [`Aggregator`] merges them into a single
//! [`CompatibilityData`](crate::model::CompatibilityData); [`load_data_dir`]
//! does the same straight from a directory on disk.

mod aggregate;
mod directory;
mod partition;

pub use aggregate::{Aggregator, MergePolicy, MergeStats};
pub use directory::{
    load_catalog_file, load_data_dir, load_data_dir_with_stats, load_partition_file,
    partition_files, CATALOG_FILE, PLATFORMS_DIR,
};
pub use partition::{FeatureCatalog, VendorPartition};
