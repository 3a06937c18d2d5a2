//! Aggregate report value types.
//!
//! These are plain results of in-memory reductions over the full record set.

use serde::{Serialize, Serializer};

/// Fixed GPA bands, in reporting order.
///
/// Bands are half-open `[low, high)` except the top band, which is closed
/// at 4.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GpaBand {
    Failing,
    Weak,
    Fair,
    Strong,
}

impl GpaBand {
    pub const ALL: [GpaBand; 4] = [Self::Failing, Self::Weak, Self::Fair, Self::Strong];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Failing => "0.0 - 1.0",
            Self::Weak => "1.0 - 2.0",
            Self::Fair => "2.0 - 3.0",
            Self::Strong => "3.0 - 4.0",
        }
    }

    pub fn for_gpa(gpa: f64) -> Self {
        if gpa < 1.0 {
            Self::Failing
        } else if gpa < 2.0 {
            Self::Weak
        } else if gpa < 3.0 {
            Self::Fair
        } else {
            Self::Strong
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Failing => 0,
            Self::Weak => 1,
            Self::Fair => 2,
            Self::Strong => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpaBandCount {
    pub band: GpaBand,
    pub label: &'static str,
    pub count: usize,
}

/// Record counts per GPA band. All four bands are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpaDistribution {
    bands: [GpaBandCount; 4],
}

impl Default for GpaDistribution {
    fn default() -> Self {
        Self {
            bands: GpaBand::ALL.map(|band| GpaBandCount {
                band,
                label: band.label(),
                count: 0,
            }),
        }
    }
}

impl GpaDistribution {
    pub fn from_gpas(gpas: impl IntoIterator<Item = f64>) -> Self {
        let mut distribution = Self::default();
        for gpa in gpas {
            distribution.bands[GpaBand::for_gpa(gpa).index()].count += 1;
        }
        distribution
    }

    pub fn count(&self, band: GpaBand) -> usize {
        self.bands[band.index()].count
    }

    pub fn counts(&self) -> [usize; 4] {
        self.bands.map(|b| b.count)
    }

    pub fn bands(&self) -> &[GpaBandCount] {
        &self.bands
    }
}

/// One row per programme: record count and mean GPA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgrammeSummary {
    pub programme: String,
    pub total: usize,
    #[serde(serialize_with = "two_decimals")]
    pub average_gpa: f64,
}

impl ProgrammeSummary {
    pub fn formatted_average_gpa(&self) -> String {
        format!("{:.2}", self.average_gpa)
    }
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub average_gpa: f64,
}
