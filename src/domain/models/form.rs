use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::ValidationError,
    models::tractor::{Tractor, TractorRecord},
    value_objects::{ImageFilename, PhoneNumber, Price},
};

/// Raw admin form values, exactly as typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TractorForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub engine: String,
    pub horsepower: String,
    pub drivetrain: String,
    pub hours_of_use: String,
    pub condition: String,
    pub location: String,
    pub year: String,
    pub single_owner: bool,
    pub is_available: bool,
}

impl Default for TractorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            description: String::new(),
            engine: String::new(),
            horsepower: String::new(),
            drivetrain: "4x4".to_string(),
            hours_of_use: String::new(),
            condition: "Novo".to_string(),
            location: String::new(),
            year: Utc::now().year().to_string(),
            single_owner: false,
            is_available: true,
        }
    }
}

/// Form values after parsing, missing only the image and contact number
#[derive(Debug, Clone, PartialEq)]
pub struct TractorFields {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub engine: Option<String>,
    pub horsepower: Option<String>,
    pub drivetrain: Option<String>,
    pub hours_of_use: Option<i32>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub single_owner: bool,
    pub is_available: bool,
}

impl TractorForm {
    /// Pre-fill the form from a stored listing
    pub fn from_tractor(tractor: &Tractor) -> Self {
        let d = &tractor.details;
        let defaults = Self::default();

        Self {
            name: d.name.clone(),
            price: d.price.value().to_string(),
            description: d.description.clone(),
            engine: d.engine.clone().unwrap_or_default(),
            horsepower: d.horsepower.clone().unwrap_or_default(),
            drivetrain: d.drivetrain.clone().unwrap_or(defaults.drivetrain),
            hours_of_use: d.hours_of_use.map(|h| h.to_string()).unwrap_or_default(),
            condition: d.condition.clone().unwrap_or(defaults.condition),
            location: d.location.clone().unwrap_or_default(),
            year: d.year.map(|y| y.to_string()).unwrap_or(defaults.year),
            single_owner: d.single_owner,
            is_available: d.is_available,
        }
    }

    pub fn parse(&self) -> Result<TractorFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Price::new)
            .ok_or_else(|| ValidationError::InvalidNumber {
                field: "price",
                value: self.price.clone(),
            })?;

        Ok(TractorFields {
            name: name.to_string(),
            price,
            description: self.description.trim().to_string(),
            engine: optional_text(&self.engine),
            horsepower: optional_text(&self.horsepower),
            drivetrain: optional_text(&self.drivetrain),
            hours_of_use: optional_integer("hours_of_use", &self.hours_of_use)?,
            condition: optional_text(&self.condition),
            location: optional_text(&self.location),
            year: optional_integer("year", &self.year)?,
            single_owner: self.single_owner,
            is_available: self.is_available,
        })
    }
}

impl TractorFields {
    pub fn into_record(self, image_url: ImageFilename, whatsapp_number: PhoneNumber) -> TractorRecord {
        TractorRecord {
            name: self.name,
            price: self.price,
            description: self.description,
            image_url,
            whatsapp_number,
            is_available: self.is_available,
            engine: self.engine,
            horsepower: self.horsepower,
            drivetrain: self.drivetrain,
            hours_of_use: self.hours_of_use,
            condition: self.condition,
            location: self.location,
            year: self.year,
            single_owner: self.single_owner,
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_integer(field: &'static str, value: &str) -> Result<Option<i32>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
