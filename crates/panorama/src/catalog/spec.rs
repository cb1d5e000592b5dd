//! Catalog specification: which columns are filters, questionnaires and metrics.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PanoramaError, Result};

/// A dataset column with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub column: String,
    pub display: String,
}

impl ColumnSpec {
    pub fn new(column: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            display: display.into(),
        }
    }
}

/// A titled group of plain filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    pub filters: Vec<ColumnSpec>,
}

/// A composite index reported as a weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Identifier used by queries.
    pub id: String,
    pub column: String,
    pub display: String,
}

/// Declarative description of the filter catalog.
///
/// Columns listed here but absent from a given dataset are skipped when the
/// catalog is built, so one specification serves several dataset vintages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSpec {
    /// Column holding the sampling weight.
    pub weight_column: String,
    /// Plain filter sections, in presentation order.
    pub sections: Vec<SectionSpec>,
    /// Questionnaire columns whose labels become filter dimensions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questionnaires: Vec<ColumnSpec>,
    /// The fixed metric set.
    pub metrics: Vec<MetricSpec>,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        let section = |title: &str, filters: &[(&str, &str)]| SectionSpec {
            title: title.to_string(),
            filters: filters
                .iter()
                .map(|(column, display)| ColumnSpec::new(*column, *display))
                .collect(),
        };

        Self {
            weight_column: "weight".to_string(),
            sections: vec![
                section(
                    "Demográfico",
                    &[
                        ("gender", "Gênero"),
                        ("age", "Faixa Etária"),
                        ("race", "Raça"),
                        ("religion", "Religião"),
                        ("gender_identity", "Identidade de Gênero"),
                        ("sexual_orientation", "Orientação Sexual"),
                        ("marital_status", "Estado Civil"),
                    ],
                ),
                section(
                    "Socioeconômico",
                    &[
                        ("educational_level", "Nível Educacional"),
                        ("family_income", "Renda Familiar"),
                        ("receive_bolsa_familia", "Recebe Bolsa Família"),
                        (
                            "employed_or_looking_for_employment",
                            "Empregado ou Procurando Emprego",
                        ),
                        ("employment", "Emprego"),
                        (
                            "who_is_primarily_responsible_for_supporting_your_home",
                            "Responsável Principal pelo Sustento do Lar",
                        ),
                    ],
                ),
                section(
                    "Pessoal",
                    &[
                        ("have_kids", "Tem Filhos"),
                        ("age_of_youngest_kid", "Idade do Filho Mais Novo"),
                        ("are_you_a_person_with_disability", "Pessoa com Deficiência"),
                        (
                            "ever_thought_you_should_stop_drinking",
                            "Já pensou que deveria parar de beber",
                        ),
                    ],
                ),
            ],
            questionnaires: Vec::new(),
            metrics: vec![
                MetricSpec {
                    id: "icasm".to_string(),
                    column: "atlas_mh_index".to_string(),
                    display: "ICASM".to_string(),
                },
                MetricSpec {
                    id: "vitality".to_string(),
                    column: "vitality_index".to_string(),
                    display: "Índice de Vitalidade".to_string(),
                },
            ],
        }
    }
}

impl CatalogSpec {
    /// A specification with only a weight column and no dimensions.
    pub fn empty(weight_column: impl Into<String>) -> Self {
        Self {
            weight_column: weight_column.into(),
            sections: Vec::new(),
            questionnaires: Vec::new(),
            metrics: Vec::new(),
        }
    }

    /// Add a plain filter to the named section, creating the section if needed.
    pub fn with_filter(
        mut self,
        section: &str,
        column: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        let spec = ColumnSpec::new(column, display);
        match self.sections.iter_mut().find(|s| s.title == section) {
            Some(existing) => existing.filters.push(spec),
            None => self.sections.push(SectionSpec {
                title: section.to_string(),
                filters: vec![spec],
            }),
        }
        self
    }

    /// Register a questionnaire column.
    pub fn with_questionnaire(mut self, column: impl Into<String>, display: impl Into<String>) -> Self {
        let spec = ColumnSpec::new(column, display);
        if !self.questionnaires.iter().any(|q| q.column == spec.column) {
            self.questionnaires.push(spec);
        }
        self
    }

    /// Register a metric.
    pub fn with_metric(
        mut self,
        id: impl Into<String>,
        column: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        self.metrics.push(MetricSpec {
            id: id.into(),
            column: column.into(),
            display: display.into(),
        });
        self
    }

    /// Check the specification for internal contradictions.
    pub fn validate(&self) -> Result<()> {
        if self.weight_column.trim().is_empty() {
            return Err(PanoramaError::Config("weight column must be named".to_string()));
        }

        let mut ids = HashSet::new();
        for metric in &self.metrics {
            if !ids.insert(metric.id.as_str()) {
                return Err(PanoramaError::Config(format!(
                    "metric '{}' is defined twice",
                    metric.id
                )));
            }
        }

        let mut columns = HashSet::new();
        let dimension_columns = self
            .sections
            .iter()
            .flat_map(|s| s.filters.iter())
            .chain(self.questionnaires.iter());
        for spec in dimension_columns {
            if !columns.insert(spec.column.as_str()) {
                return Err(PanoramaError::Config(format!(
                    "column '{}' is listed as a dimension twice",
                    spec.column
                )));
            }
        }

        Ok(())
    }

    /// Load a specification from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            PanoramaError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let spec: CatalogSpec = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            PanoramaError::Persistence(format!(
                "Failed to parse catalog spec '{}': {}",
                path.display(),
                e
            ))
        })?;

        spec.validate()?;
        Ok(spec)
    }

    /// Save the specification as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    PanoramaError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            PanoramaError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
