//! Mesa (dining table) Model

use super::InvalidStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Table occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MesaStatus {
    #[serde(rename = "available", alias = "disponivel")]
    Available,
    #[serde(rename = "occupied", alias = "ocupada")]
    Occupied,
}

impl MesaStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl FromStr for MesaStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "available" | "disponivel" => Ok(Self::Available),
            "occupied" | "ocupada" => Ok(Self::Occupied),
            other => Err(InvalidStatus::new("mesa", other)),
        }
    }
}

impl TryFrom<String> for MesaStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MesaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mesa entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Mesa {
    pub id: i64,
    /// Number shown on the table
    pub numero: i32,
    /// Seat count
    pub capacidade: i32,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: MesaStatus,
}

impl Mesa {
    pub fn summary(&self) -> MesaSummary {
        MesaSummary {
            numero: self.numero,
            capacidade: self.capacidade,
            status: self.status,
        }
    }

    pub fn reference(&self) -> MesaRef {
        MesaRef {
            numero: self.numero,
        }
    }
}

/// Mesa fields embedded in a comanda read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesaSummary {
    pub numero: i32,
    pub capacidade: i32,
    pub status: MesaStatus,
}

/// Mesa fields embedded in a pedido read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesaRef {
    pub numero: i32,
}
