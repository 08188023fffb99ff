//! Defines the assumed metabolic work rate used to parameterise the lookup-based index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The work-intensity level a heat-stress lookup is evaluated for.
///
/// Heavier work produces more metabolic heat, so the same air temperature and
/// humidity map to a higher index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkIntensity {
    /// Seated or light manual work.
    Light,
    /// Sustained walking, moderate lifting.
    Moderate,
    /// Heavy manual labour.
    Heavy,
}

impl WorkIntensity {
    /// Every level, in ascending order of metabolic rate.
    pub const ALL: [WorkIntensity; 3] = [
        WorkIntensity::Light,
        WorkIntensity::Moderate,
        WorkIntensity::Heavy,
    ];

    /// The key used for this level in the lookup-table asset.
    pub fn key(&self) -> &'static str {
        match self {
            WorkIntensity::Light => "light",
            WorkIntensity::Moderate => "moderate",
            WorkIntensity::Heavy => "heavy",
        }
    }
}

/// Formats a `WorkIntensity` using its table key.
///
/// # Examples
///
/// ```
/// use heatstress::WorkIntensity;
///
/// assert_eq!(WorkIntensity::Heavy.to_string(), "heavy");
/// ```
impl fmt::Display for WorkIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
