//! Per-category overview of the catalog.
//!
//! Pairs the static description of each dataset with what the session has
//! actually collected for it.

use crate::catalog::Catalog;
use crate::classifier::Category;
use crate::constants::DATASET_DESCRIPTIONS;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub name: &'static str,
    /// Category whose uploads feed this dataset
    pub category: Option<Category>,
    /// Empty for datasets without a static description
    pub description: &'static str,
    pub last_updated: Option<&'static str>,
    /// Reference variables and their definitions
    pub reference_variables: Vec<(&'static str, &'static str)>,
    pub file_count: usize,
    /// Distinct variables found in catalogued files, in encounter order
    pub detected_variables: Vec<String>,
}

/// The reference datasets in catalogue order, then uploads no dataset claims
pub fn overview(catalog: &Catalog) -> Vec<DatasetOverview> {
    let mut overview: Vec<DatasetOverview> = DATASET_DESCRIPTIONS
        .iter()
        .map(|dataset| {
            let (file_count, detected_variables) = collected(catalog, dataset.category);
            DatasetOverview {
                name: dataset.name,
                category: dataset.category,
                description: dataset.description,
                last_updated: Some(dataset.last_updated),
                reference_variables: dataset.variables.to_vec(),
                file_count,
                detected_variables,
            }
        })
        .collect();

    let (file_count, detected_variables) = collected(catalog, Some(Category::Other));
    overview.push(DatasetOverview {
        name: Category::Other.label(),
        category: Some(Category::Other),
        description: "",
        last_updated: None,
        reference_variables: Vec::new(),
        file_count,
        detected_variables,
    });

    overview
}

/// File count and distinct variables of the records filed under `category`
fn collected(catalog: &Catalog, category: Option<Category>) -> (usize, Vec<String>) {
    let Some(category) = category else {
        return (0, Vec::new());
    };

    let mut file_count = 0;
    let mut detected_variables: Vec<String> = Vec::new();

    for record in catalog.by_category(category) {
        file_count += 1;
        for variable in &record.variables {
            if !detected_variables.contains(variable) {
                detected_variables.push(variable.clone());
            }
        }
    }

    (file_count, detected_variables)
}
