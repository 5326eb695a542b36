//! Pure fluids with a liquid-vapor dome that the diagram can be drawn for.

use rfluids::substance::Pure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Species {
    H2O,
    N2,
    Ar,
    CO2,
    CH4,
    Ammonia,
    Propane,
    R134a,
}

/// Static naming data for one species.
struct Descriptor {
    key: &'static str,
    display: &'static str,
    coolprop: &'static str,
    /// Extra spellings accepted by `FromStr`, upper-case.
    aliases: &'static [&'static str],
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::H2O,
        Species::N2,
        Species::Ar,
        Species::CO2,
        Species::CH4,
        Species::Ammonia,
        Species::Propane,
        Species::R134a,
    ];

    fn descriptor(self) -> Descriptor {
        let (key, display, coolprop, aliases): (_, _, _, &'static [&'static str]) = match self {
            Species::H2O => ("H2O", "Water", "Water", &["WATER", "STEAM"]),
            Species::N2 => ("N2", "Nitrogen", "Nitrogen", &["NITROGEN"]),
            Species::Ar => ("Ar", "Argon", "Argon", &["ARGON"]),
            Species::CO2 => (
                "CO2",
                "Carbon Dioxide",
                "CarbonDioxide",
                &["CARBONDIOXIDE", "CARBON DIOXIDE"],
            ),
            Species::CH4 => ("CH4", "Methane", "Methane", &["METHANE"]),
            Species::Ammonia => ("NH3", "Ammonia", "Ammonia", &["AMMONIA"]),
            Species::Propane => ("Propane", "Propane", "n-Propane", &["C3H8", "N-PROPANE"]),
            Species::R134a => ("R134a", "R134a", "R134a", &[]),
        };
        Descriptor {
            key,
            display,
            coolprop,
            aliases,
        }
    }

    /// Canonical key used in scene files.
    pub fn key(&self) -> &'static str {
        self.descriptor().key
    }

    /// CoolProp fluid name for this species.
    pub fn coolprop_name(&self) -> &'static str {
        self.descriptor().coolprop
    }

    pub fn display_name(&self) -> &'static str {
        self.descriptor().display
    }

    pub(crate) fn rfluids_pure(&self) -> Pure {
        match self {
            Species::H2O => Pure::Water,
            Species::N2 => Pure::Nitrogen,
            Species::Ar => Pure::Argon,
            Species::CO2 => Pure::CarbonDioxide,
            Species::CH4 => Pure::Methane,
            Species::Ammonia => Pure::Ammonia,
            Species::Propane => Pure::nPropane,
            Species::R134a => Pure::R134a,
        }
    }
}

impl std::str::FromStr for Species {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Species::ALL
            .into_iter()
            .find(|species| {
                let d = species.descriptor();
                d.key.eq_ignore_ascii_case(&wanted) || d.aliases.contains(&wanted.as_str())
            })
            .ok_or("unknown species")
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<String> for Species {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.key().to_string()
    }
}
