//! Filename-based dataset classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset a file is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Impacto Social")]
    SocialImpact,
    #[serde(rename = "Indicadores Ambientales")]
    EnvironmentalIndicators,
    #[serde(rename = "Otros Datos")]
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::SocialImpact,
        Category::EnvironmentalIndicators,
        Category::Other,
    ];

    /// Detect the category from a filename; "impacto" wins over "ambiental"
    pub fn from_filename(filename: &str) -> Self {
        let name = filename.to_lowercase();

        if name.contains("impacto") {
            Category::SocialImpact
        } else if name.contains("ambiental") {
            Category::EnvironmentalIndicators
        } else {
            Category::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SocialImpact => "Impacto Social",
            Category::EnvironmentalIndicators => "Indicadores Ambientales",
            Category::Other => "Otros Datos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a file by name
pub fn classify(filename: &str) -> Category {
    Category::from_filename(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impacto_takes_priority() {
        assert_eq!(
            classify("reporte_impacto_ambiental.csv"),
            Category::SocialImpact
        );
    }

    #[test]
    fn test_environmental_and_default() {
        assert_eq!(
            classify("datos_ambientales.csv"),
            Category::EnvironmentalIndicators
        );
        assert_eq!(classify("notas.txt"), Category::Other);
        assert_eq!(classify(""), Category::Other);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("IMPACTO_Q2.XLSX"), Category::SocialImpact);
        assert_eq!(classify("Ambiental_Q1.csv"), Category::EnvironmentalIndicators);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::SocialImpact.to_string(), "Impacto Social");
        assert_eq!(
            Category::EnvironmentalIndicators.to_string(),
            "Indicadores Ambientales"
        );
        assert_eq!(Category::Other.to_string(), "Otros Datos");
    }
}
