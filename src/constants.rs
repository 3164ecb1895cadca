//! Application constants for the intake pipeline
//!
//! Default values, report labels, demo seed data and the static dataset
//! descriptions shown alongside catalogued files.

use crate::classifier::Category;

// =============================================================================
// Input Directory and Seeding
// =============================================================================

/// Default input directory, relative to the working directory
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Demo files written into a freshly created input directory
pub mod seed {
    /// Environmental time series (water consumption and emissions)
    pub const ENVIRONMENTAL_FILE: &str = "ambiental_q1.csv";

    /// Community activity log
    pub const SOCIAL_FILE: &str = "social_abril.csv";
}

// =============================================================================
// History Report
// =============================================================================

/// Shown when a record has no author
pub const UNKNOWN_AUTHOR: &str = "Desconocido";

/// Shown when a record has no organisational unit
pub const UNSPECIFIED_UNIT: &str = "No especificada";

/// Text of the inconsistency flag
pub const INCONSISTENCY_NOTICE: &str = "Posible inconsistencia";

/// Minimum variables and rows before a file stops looking suspicious
pub const MIN_CONSISTENT_SIZE: usize = 2;

/// Column headers of the history table
pub mod history_columns {
    pub const FILE: &str = "Archivo";
    pub const CATEGORY: &str = "Categoría";
    pub const FORMAT: &str = "Formato";
    pub const UPLOAD_DATE: &str = "Fecha de carga";
    pub const VARIABLES: &str = "Variables detectadas";
    pub const AUTHOR: &str = "Autor";
    pub const UNIT: &str = "Unidad";
    pub const FLAG: &str = "Alerta";
}

/// Date format used in reports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Dataset Descriptions
// =============================================================================

/// Static reference dataset shown in the overview
#[derive(Debug, Clone, Copy)]
pub struct DatasetDescription {
    pub name: &'static str,
    /// Category the classifier files matching uploads under, if any
    pub category: Option<Category>,
    pub description: &'static str,
    /// Date of the last update, `DATE_FORMAT`
    pub last_updated: &'static str,
    /// Reference variables and their definitions
    pub variables: &'static [(&'static str, &'static str)],
}

pub const DATASET_DESCRIPTIONS: &[DatasetDescription] = &[
    DatasetDescription {
        name: "Indicadores Ambientales",
        category: Some(Category::EnvironmentalIndicators),
        description: "Contiene métricas clave sobre consumo hídrico, emisiones de gases y residuos generados en las operaciones.",
        last_updated: "2025-05-15",
        variables: &[
            ("consumo_hidrico_m3", "Volumen total de agua utilizada en m³"),
            ("emisiones_co2_ton", "Toneladas de CO2 emitidas en el periodo"),
            ("residuos_generados", "Total de residuos sólidos registrados"),
        ],
    },
    // No filename rule routes uploads here
    DatasetDescription {
        name: "Relaciones Comunitarias",
        category: None,
        description: "Registra eventos de vinculación comunitaria, talleres, reuniones y acciones de participación ciudadana.",
        last_updated: "2025-05-14",
        variables: &[
            ("actividad", "Nombre de la actividad ejecutada"),
            ("participantes", "Cantidad de personas participantes"),
            ("comunidad", "Nombre o sector de la comunidad involucrada"),
        ],
    },
    DatasetDescription {
        name: "Impacto Social",
        category: Some(Category::SocialImpact),
        description: "Resume los impactos positivos o negativos de los proyectos sobre el bienestar de las comunidades.",
        last_updated: "2025-05-13",
        variables: &[
            ("categoria_impacto", "Área temática del impacto (salud, educación, etc.)"),
            ("nivel_impacto", "Magnitud del impacto percibido"),
            ("beneficiarios_directos", "Número estimado de personas afectadas positivamente"),
        ],
    },
];

/// Look up the reference dataset a category feeds
pub fn describe(category: Category) -> Option<&'static DatasetDescription> {
    DATASET_DESCRIPTIONS
        .iter()
        .find(|d| d.category == Some(category))
}

// =============================================================================
// Report Options
// =============================================================================

/// Choices offered when configuring a report. Reports are not generated;
/// these lists are kept as static configuration.
pub mod report {
    pub const AUDIENCES: &[&str] = &[
        "Público general",
        "Comunidad local",
        "Medio de comunicación",
        "Autoridad reguladora",
        "Inversionistas",
    ];

    /// Selectable report components, one per reference dataset
    pub const COMPONENTS: &[&str] = &[
        "Indicadores Ambientales",
        "Relaciones Comunitarias",
        "Impacto Social",
    ];

    pub const DEFAULT_COMPONENT: &str = "Indicadores Ambientales";

    pub const OUTPUT_FORMATS: &[&str] = &["PDF", "HTML", "Word"];

    pub const STYLES: &[&str] = &[
        "Resumen ejecutivo",
        "Informe técnico",
        "Informe con visualizaciones",
    ];

    /// Sections assumed for an uploaded report template
    pub const TEMPLATE_SECTIONS: &[&str] = &[
        "Introducción",
        "Metodología",
        "Indicadores Clave",
        "Conclusiones",
    ];
}
