//! Built-in data: the fallback dataset and the regional cluster series.

use super::{Dataset, Metadata, Table};

/// Names of the six regional clusters, in layout order.
pub const REGION_NAMES: [&str; 6] = [
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
    "Middle East",
    "Africa",
];

const REGIONAL_SERIES: [[f64; 16]; 6] = [
    [45.0, 67.0, 89.0, 112.0, 78.0, 95.0, 123.0, 145.0, 89.0, 112.0, 134.0, 156.0, 67.0, 89.0, 112.0, 134.0],
    [34.0, 56.0, 78.0, 95.0, 67.0, 89.0, 112.0, 134.0, 78.0, 95.0, 123.0, 145.0, 56.0, 78.0, 95.0, 123.0],
    [23.0, 45.0, 67.0, 89.0, 45.0, 67.0, 89.0, 112.0, 67.0, 89.0, 112.0, 134.0, 45.0, 67.0, 89.0, 112.0],
    [12.0, 34.0, 56.0, 78.0, 34.0, 56.0, 78.0, 95.0, 56.0, 78.0, 95.0, 123.0, 34.0, 56.0, 78.0, 95.0],
    [67.0, 89.0, 112.0, 134.0, 89.0, 112.0, 134.0, 156.0, 112.0, 134.0, 156.0, 178.0, 89.0, 112.0, 134.0, 156.0],
    [56.0, 78.0, 95.0, 123.0, 78.0, 95.0, 123.0, 145.0, 95.0, 123.0, 145.0, 167.0, 78.0, 95.0, 123.0, 145.0],
];

/// Side length of a cluster grid.
pub(crate) const CLUSTER_SIDE: usize = 4;

/// The six regional series reshaped into 4×4 tables, one per cluster.
pub fn regional_clusters() -> Vec<Table> {
    REGION_NAMES
        .iter()
        .zip(REGIONAL_SERIES.iter())
        .map(|(name, series)| {
            let rows: Vec<Vec<f64>> = series
                .chunks(CLUSTER_SIDE)
                .map(|chunk| chunk.to_vec())
                .collect();
            Table {
                name: (*name).to_string(),
                row_labels: (1..=CLUSTER_SIDE).map(|i| format!("Segment {}", i)).collect(),
                column_labels: super::default_column_labels(CLUSTER_SIDE),
                values: ndarray::Array2::from_shape_fn((CLUSTER_SIDE, CLUSTER_SIDE), |(r, c)| {
                    rows[r][c]
                }),
            }
        })
        .collect()
}

/// Small dataset substituted when loading fails under the fallback policy.
pub fn fallback_dataset() -> Dataset {
    let quarters = super::default_column_labels(4);

    let sales = Table {
        name: "sales".to_string(),
        row_labels: vec![
            "Electronics".into(),
            "Clothing".into(),
            "Home".into(),
            "Sports".into(),
        ],
        column_labels: quarters.clone(),
        values: ndarray::arr2(&[
            [120.0, 135.0, 150.0, 170.0],
            [80.0, 85.0, 95.0, 90.0],
            [60.0, 70.0, 65.0, 75.0],
            [45.0, 55.0, 60.0, 72.0],
        ]),
    };

    let regional = Table {
        name: "regional".to_string(),
        row_labels: REGION_NAMES[..4].iter().map(|s| s.to_string()).collect(),
        column_labels: quarters,
        values: ndarray::arr2(&[
            [45.0, 67.0, 89.0, 112.0],
            [34.0, 56.0, 78.0, 95.0],
            [23.0, 45.0, 67.0, 89.0],
            [12.0, 34.0, 56.0, 78.0],
        ]),
    };

    Dataset {
        metadata: Metadata {
            title: Some("Sample Sales Data".to_string()),
            subtitle: Some("Built-in fallback dataset".to_string()),
            version: Some("fallback".to_string()),
            value_label: Some("Sales ($K)".to_string()),
            extra: Default::default(),
        },
        tables: [sales, regional]
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_clusters_shape() {
        let clusters = regional_clusters();
        assert_eq!(clusters.len(), 6);
        assert!(clusters.iter().all(|t| t.rows() == 4 && t.cols() == 4));
        assert_eq!(clusters[0].value(0, 3), Some(112.0));
        assert_eq!(clusters[4].value(2, 3), Some(178.0));
    }

    #[test]
    fn test_fallback_is_valid() {
        let dataset = fallback_dataset();
        assert_eq!(dataset.len(), 2);
        for table in dataset.tables.values() {
            let rows: Vec<Vec<f64>> = (0..table.rows()).filter_map(|r| table.row(r)).collect();
            assert!(super::super::dataset::validate_rows(&rows).is_ok());
            assert_eq!(table.row_labels.len(), table.rows());
        }
    }
}
