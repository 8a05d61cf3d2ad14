//! Publish status of a catalog product.

use serde::{Deserialize, Serialize};

/// Where a product sits in the publishing workflow.
///
/// Serialized with the backend's human-readable labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PublishStatus {
    /// Being edited; not visible to buyers.
    #[default]
    Draft,
    /// Waiting for an admin to approve it.
    #[serde(rename = "Pending Review")]
    PendingReview,
    /// Visible to buyers.
    Published,
    /// Hidden, data preserved.
    Archived,
}

impl PublishStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Draft,
        Self::PendingReview,
        Self::Published,
        Self::Archived,
    ];

    /// The backend label for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingReview => "Pending Review",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PublishStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "draft" => Ok(Self::Draft),
            "pending review" => Ok(Self::PendingReview),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid publish status: {s}")),
        }
    }
}
