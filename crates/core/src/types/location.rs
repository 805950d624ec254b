//! Campus location enum.

use serde::{Deserialize, Serialize};

/// Where on campus a store operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusLocation {
    /// Xing'an canteen.
    Xingan,
    /// Shanbei canteen.
    Shanbei,
    /// Specialty restaurant court.
    Specialty,
}

impl CampusLocation {
    /// All locations, in display order.
    pub const ALL: [Self; 3] = [Self::Xingan, Self::Shanbei, Self::Specialty];

    /// Human-readable name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Xingan => "Xing'an Canteen",
            Self::Shanbei => "Shanbei Canteen",
            Self::Specialty => "Specialty Court",
        }
    }

    /// Wire token used in persisted data and AI payloads.
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::Xingan => "XINGAN",
            Self::Shanbei => "SHANBEI",
            Self::Specialty => "SPECIALTY",
        }
    }
}

impl std::fmt::Display for CampusLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for CampusLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "XINGAN" => Ok(Self::Xingan),
            "SHANBEI" => Ok(Self::Shanbei),
            "SPECIALTY" => Ok(Self::Specialty),
            _ => Err(format!("unknown campus location: {s}")),
        }
    }
}
