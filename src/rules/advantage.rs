use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Battle types. Vaccine beats Virus beats Data beats Vaccine; Free and
/// Unknown grant no advantage in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureType {
    Vaccine,
    Virus,
    Data,
    Free,
    Unknown,
}

/// Elemental attributes. Fire beats Nature beats Water beats Fire, and
/// Light beats Dark. Asymmetric: the beaten side gets no reverse credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Fire,
    Water,
    Nature,
    Light,
    Dark,
}

pub fn type_beats(attacker: CreatureType, defender: CreatureType) -> bool {
    matches!(
        (attacker, defender),
        (CreatureType::Vaccine, CreatureType::Virus)
            | (CreatureType::Virus, CreatureType::Data)
            | (CreatureType::Data, CreatureType::Vaccine)
    )
}

pub fn attribute_beats(attacker: Attribute, defender: Attribute) -> bool {
    matches!(
        (attacker, defender),
        (Attribute::Fire, Attribute::Nature)
            | (Attribute::Nature, Attribute::Water)
            | (Attribute::Water, Attribute::Fire)
            | (Attribute::Light, Attribute::Dark)
    )
}

impl CreatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureType::Vaccine => "vaccine",
            CreatureType::Virus => "virus",
            CreatureType::Data => "data",
            CreatureType::Free => "free",
            CreatureType::Unknown => "unknown",
        }
    }
}

impl FromStr for CreatureType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "vaccine" => Ok(CreatureType::Vaccine),
            "virus" => Ok(CreatureType::Virus),
            "data" => Ok(CreatureType::Data),
            "free" => Ok(CreatureType::Free),
            "unknown" => Ok(CreatureType::Unknown),
            other => Err(format!("unknown creature type: {}", other)),
        }
    }
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Fire => "fire",
            Attribute::Water => "water",
            Attribute::Nature => "nature",
            Attribute::Light => "light",
            Attribute::Dark => "dark",
        }
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "fire" => Ok(Attribute::Fire),
            "water" => Ok(Attribute::Water),
            "nature" => Ok(Attribute::Nature),
            "light" => Ok(Attribute::Light),
            "dark" => Ok(Attribute::Dark),
            other => Err(format!("unknown attribute: {}", other)),
        }
    }
}
