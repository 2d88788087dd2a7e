use time::OffsetDateTime;

use crate::core::calc::{PricingSettings, ProjectTotals};
use crate::core::db::accessory::SelectionRepository;
use crate::core::db::item::ItemRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Offer,
    Pending,
    Approved,
    Revised,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Offer => "Teklif",
            ProjectStatus::Pending => "Beklemede",
            ProjectStatus::Approved => "Onaylandı",
            ProjectStatus::Revised => "Revize",
        }
    }

    pub fn from_label(label: &str) -> Option<ProjectStatus> {
        [
            ProjectStatus::Offer,
            ProjectStatus::Pending,
            ProjectStatus::Approved,
            ProjectStatus::Revised,
        ]
        .into_iter()
        .find(|s| s.label() == label)
    }
}

impl TryFrom<i64> for ProjectStatus {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProjectStatus::Offer),
            1 => Ok(ProjectStatus::Pending),
            2 => Ok(ProjectStatus::Approved),
            3 => Ok(ProjectStatus::Revised),
            _ => Err(anyhow::anyhow!("Invalid ProjectStatus value: {}", value)),
        }
    }
}

impl From<ProjectStatus> for i64 {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Offer => 0,
            ProjectStatus::Pending => 1,
            ProjectStatus::Approved => 2,
            ProjectStatus::Revised => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: i64,
    /// Human-readable quote number, assigned from the workspace counter.
    pub project_number: i64,
    pub name: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: OffsetDateTime,
    /// Refreshed on every revision; `created_at` never changes.
    pub offer_date: OffsetDateTime,
    /// Single uppercase revision letter, starting at 'A'.
    pub current_version: char,
    pub status: ProjectStatus,
    pub(super) _guard: (),
}

impl Project {
    /// Display code for the quote, e.g. "2620A".
    pub fn code(&self) -> String {
        format!("{}{}", self.project_number, self.current_version)
    }
}

/// Next revision letter: A→B→…→Z, saturating at Z. Anything that is not
/// an uppercase letter restarts at A.
pub fn next_version(current: char) -> char {
    match current {
        'A'..='Y' => char::from(current as u8 + 1),
        'Z' => 'Z',
        _ => 'A',
    }
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

pub trait BoundProjectRepository: ItemRepository + SelectionRepository {
    fn get_project(&self) -> impl Future<Output = anyhow::Result<Project>>;
    fn update_project(
        &self,
        project: &Project,
        update: &ProjectUpdate,
    ) -> impl Future<Output = anyhow::Result<Project>>;
    /// Advance the revision letter, refresh the offer date and mark the
    /// project revised.
    fn revise(&self) -> impl Future<Output = anyhow::Result<Project>>;
    /// Load the project's lines and selections and run the pricing engine
    /// over them. Every screen showing a total goes through this one path.
    fn totals(
        &self,
        settings: &PricingSettings,
    ) -> impl Future<Output = anyhow::Result<ProjectTotals>>;
    fn delete(self) -> impl Future<Output = anyhow::Result<()>>;
}

pub trait ProjectRepository: 'static {
    type Store: BoundProjectRepository
    where
        Self: 'static;
    fn open_project(&self, id: i64) -> impl Future<Output = anyhow::Result<Self::Store>> + 'static;
    /// Create a project, assigning the next quote number. The counter is
    /// incremented exactly once, atomically with the insert.
    fn create_project(&self, new: NewProject)
    -> impl Future<Output = anyhow::Result<Self::Store>>;
    fn get_projects(&self) -> impl Future<Output = anyhow::Result<Vec<Project>>>;
}
