//! The fixed roster of six adversaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for one of the six mental-obstacle adversaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VillainKey {
    Doubt,
    Pressure,
    Comparison,
    Failure,
    Negativity,
    Impatience,
}

/// Display metadata for a villain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VillainInfo {
    pub key: VillainKey,
    pub name: &'static str,
    pub obstacle: &'static str,
    pub description: &'static str,
}

impl VillainKey {
    pub const ALL: [VillainKey; 6] = [
        VillainKey::Doubt,
        VillainKey::Pressure,
        VillainKey::Comparison,
        VillainKey::Failure,
        VillainKey::Negativity,
        VillainKey::Impatience,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VillainKey::Doubt => "doubt",
            VillainKey::Pressure => "pressure",
            VillainKey::Comparison => "comparison",
            VillainKey::Failure => "failure",
            VillainKey::Negativity => "negativity",
            VillainKey::Impatience => "impatience",
        }
    }

    pub fn info(self) -> &'static VillainInfo {
        // INFOS is in declaration order.
        &INFOS[self as usize]
    }
}

static INFOS: [VillainInfo; 6] = [
    VillainInfo {
        key: VillainKey::Doubt,
        name: "The Question",
        obstacle: "Doubt",
        description: "Represents the feeling that you're not enough or not ready.",
    },
    VillainInfo {
        key: VillainKey::Pressure,
        name: "Burden of Pressure",
        obstacle: "Pressure",
        description: "The burden of expectations, from yourself or others.",
    },
    VillainInfo {
        key: VillainKey::Comparison,
        name: "Comparison",
        obstacle: "Comparison",
        description: "The habit of measuring your worth against someone else's.",
    },
    VillainInfo {
        key: VillainKey::Failure,
        name: "Fear of Failure",
        obstacle: "Fear of Failure",
        description: "The fear that taking action might end in embarrassment or regret.",
    },
    VillainInfo {
        key: VillainKey::Negativity,
        name: "Negativity",
        obstacle: "Negativity",
        description: "The inner critic that always points out what's wrong.",
    },
    VillainInfo {
        key: VillainKey::Impatience,
        name: "Impatience",
        obstacle: "Impatience",
        description: "The urge to rush results and abandon the process when it feels too slow.",
    },
];

impl fmt::Display for VillainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VillainKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doubt" => Ok(VillainKey::Doubt),
            "pressure" => Ok(VillainKey::Pressure),
            "comparison" => Ok(VillainKey::Comparison),
            "failure" => Ok(VillainKey::Failure),
            "negativity" => Ok(VillainKey::Negativity),
            "impatience" => Ok(VillainKey::Impatience),
            other => Err(format!(
                "unknown villain: {other} (expected one of doubt, pressure, comparison, failure, negativity, impatience)"
            )),
        }
    }
}
