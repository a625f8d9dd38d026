use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven configurable dropdown lists used when assigning tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyField {
    Projects,
    Departments,
    Assignors,
    Categorization1,
    Categorization2,
    Technicians,
    CostCenter,
}

impl TaxonomyField {
    pub const ALL: [TaxonomyField; 7] = [
        TaxonomyField::Projects,
        TaxonomyField::Departments,
        TaxonomyField::Assignors,
        TaxonomyField::Categorization1,
        TaxonomyField::Categorization2,
        TaxonomyField::Technicians,
        TaxonomyField::CostCenter,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TaxonomyField::Projects => "projects",
            TaxonomyField::Departments => "departments",
            TaxonomyField::Assignors => "assignors",
            TaxonomyField::Categorization1 => "categorization_1",
            TaxonomyField::Categorization2 => "categorization_2",
            TaxonomyField::Technicians => "technicians",
            TaxonomyField::CostCenter => "cost_center",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxonomyField::Projects => "project",
            TaxonomyField::Departments => "department",
            TaxonomyField::Assignors => "assignor",
            TaxonomyField::Categorization1 => "categorization_1",
            TaxonomyField::Categorization2 => "categorization_2",
            TaxonomyField::Technicians => "technician",
            TaxonomyField::CostCenter => "cost_center",
        }
    }
}

impl fmt::Display for TaxonomyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered, duplicate-free value lists. Order matters: it drives the default
/// selection in forms.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyDocument {
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub assignors: Vec<String>,
    #[serde(default)]
    pub categorization_1: Vec<String>,
    #[serde(default)]
    pub categorization_2: Vec<String>,
    #[serde(default)]
    pub technicians: Vec<String>,
    #[serde(default)]
    pub cost_center: Vec<String>,
}

pub const DEFAULT_COST_CENTER: &str = "Launch";

impl TaxonomyDocument {
    /// Values a fresh installation starts with.
    pub fn seeded() -> Self {
        fn list(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        }

        Self {
            projects: list(&["VK-IU", "VK-I", "VK-W", "LE", "CubesAt"]),
            departments: list(&["Avionics"]),
            assignors: Vec::new(),
            categorization_1: list(&["IS-1/2U"]),
            categorization_2: list(&["Soldering"]),
            technicians: Vec::new(),
            cost_center: list(&[DEFAULT_COST_CENTER]),
        }
    }

    pub fn values(&self, field: TaxonomyField) -> &[String] {
        match field {
            TaxonomyField::Projects => &self.projects,
            TaxonomyField::Departments => &self.departments,
            TaxonomyField::Assignors => &self.assignors,
            TaxonomyField::Categorization1 => &self.categorization_1,
            TaxonomyField::Categorization2 => &self.categorization_2,
            TaxonomyField::Technicians => &self.technicians,
            TaxonomyField::CostCenter => &self.cost_center,
        }
    }

    pub fn values_mut(&mut self, field: TaxonomyField) -> &mut Vec<String> {
        match field {
            TaxonomyField::Projects => &mut self.projects,
            TaxonomyField::Departments => &mut self.departments,
            TaxonomyField::Assignors => &mut self.assignors,
            TaxonomyField::Categorization1 => &mut self.categorization_1,
            TaxonomyField::Categorization2 => &mut self.categorization_2,
            TaxonomyField::Technicians => &mut self.technicians,
            TaxonomyField::CostCenter => &mut self.cost_center,
        }
    }

    pub fn contains(&self, field: TaxonomyField, value: &str) -> bool {
        self.values(field).iter().any(|v| v == value)
    }

    /// Default selection for a dropdown: `Launch` for cost centers when
    /// configured, otherwise the first value.
    pub fn preferred_default(&self, field: TaxonomyField) -> Option<&str> {
        let values = self.values(field);
        if field == TaxonomyField::CostCenter {
            if let Some(launch) = values.iter().find(|v| *v == DEFAULT_COST_CENTER) {
                return Some(launch);
            }
        }
        values.first().map(String::as_str)
    }
}
