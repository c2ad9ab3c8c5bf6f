use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ImageFilename, PhoneNumber, Price};

/// Condition values offered by the admin form
pub const CONDITION_OPTIONS: [&str; 4] = ["Novo", "Seminovo", "Usado", "Reformado"];

/// Drivetrain configurations offered by the admin form
pub const DRIVETRAIN_OPTIONS: [&str; 4] = ["4x2", "4x4", "6x2", "6x4"];

/// A listing as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tractor {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: TractorRecord,
}

/// The writable columns of a listing, used for both insert and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TractorRecord {
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Bare filename of the main image
    pub image_url: ImageFilename,
    pub whatsapp_number: PhoneNumber,
    pub is_available: bool,
    pub engine: Option<String>,
    pub horsepower: Option<String>,
    pub drivetrain: Option<String>,
    pub hours_of_use: Option<i32>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub single_owner: bool,
}

impl Tractor {
    pub fn new(details: TractorRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            details,
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn image(&self) -> &ImageFilename {
        &self.details.image_url
    }

    pub fn is_available(&self) -> bool {
        self.details.is_available
    }

    /// Labelled specification rows that have a value, in display order
    pub fn specifications(&self) -> Vec<(&'static str, String)> {
        let d = &self.details;
        let mut specs = Vec::new();

        if let Some(engine) = &d.engine {
            specs.push(("Motor", engine.clone()));
        }
        if let Some(horsepower) = &d.horsepower {
            specs.push(("Potência", horsepower.clone()));
        }
        if let Some(drivetrain) = &d.drivetrain {
            specs.push(("Tração", drivetrain.clone()));
        }
        if let Some(hours) = d.hours_of_use {
            specs.push(("Horas de Uso", hours.to_string()));
        }
        if let Some(condition) = &d.condition {
            specs.push(("Estado", condition.clone()));
        }
        if let Some(location) = &d.location {
            specs.push(("Localização", location.clone()));
        }
        if let Some(year) = d.year {
            specs.push(("Ano", year.to_string()));
        }
        if d.single_owner {
            specs.push(("Único Dono", "Sim".to_string()));
        }

        specs
    }
}
