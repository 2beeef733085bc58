//! Project records, state and actions

use crate::auth::{User, UserId};
use mentorhub_api::{ApiError, AuthToken};
use mentorhub_collections::{
    Collection, DEFAULT_PAGE_SIZE, FetchTicket, FilterAction, Listing, ModelSlot, Named, NewModel,
    PaginationAction, TicketIssuer,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Server-assigned project id
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Wrap a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A project as served by `/api/projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// Server id
    #[serde(rename = "_id")]
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Owner of the GitHub repository
    pub github_username: String,
    /// GitHub repository name
    pub github_project_name: String,
    /// Technologies used
    pub tech: Vec<String>,
    /// Active or past project
    pub active: bool,
    /// Repository URLs
    pub repositories: Vec<String>,
    /// Hosting of the repositories
    pub repository_type: String,
    /// Screenshot URLs
    pub photos: Vec<String>,
    /// Suggested to new mentees (admin flag)
    pub marked_default: bool,
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Draft for `POST /api/projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Owner of the GitHub repository
    pub github_username: String,
    /// GitHub repository name
    pub github_project_name: String,
    /// Technologies used
    pub tech: Vec<String>,
    /// Active or past project
    pub active: bool,
    /// Repository URLs
    pub repositories: Vec<String>,
    /// Hosting of the repositories
    pub repository_type: String,
    /// Screenshot URLs
    pub photos: Vec<String>,
}

/// Asynchronous project operations, used to route failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectOperation {
    /// Active or past project listing
    FetchCollection,
    /// Current project
    FetchModel,
    /// Contributors of the current project
    FetchContributors,
    /// Create from the draft
    Create,
    /// Replace a project
    Update,
    /// Delete a project
    Destroy,
    /// Projects the user works on
    FetchMyProjects,
    /// Projects of the user's mentees
    FetchMenteeProjects,
    /// Projects the user starred
    FetchFavoriteProjects,
    /// Star or unstar a project
    ToggleFavorite,
    /// Set the default flag
    MarkDefault,
    /// Clear the default flag
    UnmarkDefault,
    /// Move to the active projects
    MarkActive,
    /// Move to the past projects
    MarkPast,
}

impl ProjectOperation {
    /// Operation name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchCollection => "fetchCollection",
            Self::FetchModel => "fetchModel",
            Self::FetchContributors => "fetchContributors",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
            Self::FetchMyProjects => "fetchMyProjects",
            Self::FetchMenteeProjects => "fetchMenteeProjects",
            Self::FetchFavoriteProjects => "fetchFavoriteProjects",
            Self::ToggleFavorite => "toggleFavorite",
            Self::MarkDefault => "markDefault",
            Self::UnmarkDefault => "unmarkDefault",
            Self::MarkActive => "markActive",
            Self::MarkPast => "markPast",
        }
    }

    /// Whether the operation changes server state
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::Update
                | Self::Destroy
                | Self::ToggleFavorite
                | Self::MarkDefault
                | Self::UnmarkDefault
                | Self::MarkActive
                | Self::MarkPast
        )
    }
}

impl fmt::Display for ProjectOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project module state
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectState {
    pub(super) listing: Listing<Project>,
    pub(super) current: ModelSlot<Project>,
    pub(super) contributors: Collection<User>,
    pub(super) new_model: NewModel<NewProject>,
    pub(super) my_projects: Collection<Project>,
    pub(super) mentee_projects: Collection<Project>,
    pub(super) favorite_projects: Collection<Project>,
    pub(super) mutations: TicketIssuer,
    pub(super) last_error: Option<ApiError>,
}

impl ProjectState {
    /// Empty state with `page_size` records per listing page
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            listing: Listing::filtered("projects").with_page_size(page_size),
            current: ModelSlot::new(),
            contributors: Collection::named("contributors"),
            new_model: NewModel::new(),
            my_projects: Collection::named("myProjects"),
            mentee_projects: Collection::named("menteeProjects"),
            favorite_projects: Collection::named("favoriteProjects"),
            mutations: TicketIssuer::new(),
            last_error: None,
        }
    }

    /// Filtered, paginated project listing
    #[must_use]
    pub const fn listing(&self) -> &Listing<Project> {
        &self.listing
    }

    /// Project shown on the detail page
    #[must_use]
    pub const fn current(&self) -> Option<&Project> {
        self.current.model()
    }

    /// Whether the detail project is loading
    #[must_use]
    pub const fn is_fetching_current(&self) -> bool {
        self.current.is_fetching()
    }

    /// Contributors of the current project
    #[must_use]
    pub const fn contributors(&self) -> &Collection<User> {
        &self.contributors
    }

    /// Creation form draft
    #[must_use]
    pub const fn new_project(&self) -> &NewProject {
        self.new_model.draft()
    }

    /// Projects the user works on
    #[must_use]
    pub const fn my_projects(&self) -> &Collection<Project> {
        &self.my_projects
    }

    /// Projects of the user's mentees
    #[must_use]
    pub const fn mentee_projects(&self) -> &Collection<Project> {
        &self.mentee_projects
    }

    /// Projects the user starred
    #[must_use]
    pub const fn favorite_projects(&self) -> &Collection<Project> {
        &self.favorite_projects
    }

    /// Whether the user starred project `id`
    #[must_use]
    pub fn is_favorite(&self, id: &ProjectId) -> bool {
        self.favorite_projects
            .items()
            .iter()
            .any(|project| &project.id == id)
    }

    /// Whether a create, update, delete or mark request is in flight
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.mutations.pending() > 0
    }

    /// Ticket of the most recent request for `operation`
    ///
    /// Saves share one ticket sequence. Each fetch has its own.
    #[must_use]
    pub const fn latest_ticket(&self, operation: ProjectOperation) -> Option<FetchTicket> {
        match operation {
            ProjectOperation::FetchCollection => self.listing.latest_ticket(),
            ProjectOperation::FetchModel => self.current.latest_ticket(),
            ProjectOperation::FetchContributors => self.contributors.latest_ticket(),
            ProjectOperation::FetchMyProjects => self.my_projects.latest_ticket(),
            ProjectOperation::FetchMenteeProjects => self.mentee_projects.latest_ticket(),
            ProjectOperation::FetchFavoriteProjects => self.favorite_projects.latest_ticket(),
            ProjectOperation::Create
            | ProjectOperation::Update
            | ProjectOperation::Destroy
            | ProjectOperation::ToggleFavorite
            | ProjectOperation::MarkDefault
            | ProjectOperation::UnmarkDefault
            | ProjectOperation::MarkActive
            | ProjectOperation::MarkPast => self.mutations.latest(),
        }
    }

    /// Error of the last failed request
    #[must_use]
    pub const fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Settle the in-flight marker of a failed operation
    ///
    /// Returns `false` if a newer fetch superseded the failed one.
    pub(super) fn settle_failure(
        &mut self,
        operation: ProjectOperation,
        ticket: FetchTicket,
    ) -> bool {
        match operation {
            ProjectOperation::FetchCollection => self.listing.fail_fetch(ticket),
            ProjectOperation::FetchModel => self.current.fail_fetch(ticket),
            ProjectOperation::FetchContributors => self.contributors.fail_fetch(ticket),
            ProjectOperation::FetchMyProjects => self.my_projects.fail_fetch(ticket),
            ProjectOperation::FetchMenteeProjects => self.mentee_projects.fail_fetch(ticket),
            ProjectOperation::FetchFavoriteProjects => self.favorite_projects.fail_fetch(ticket),
            _ => {
                self.mutations.settle();
                true
            },
        }
    }

    /// Apply `f` to every loaded copy of project `id`
    pub(super) fn update_project(&mut self, id: &ProjectId, f: impl Fn(&mut Project)) {
        if let Some(current) = self.current.model_mut().filter(|project| &project.id == id) {
            f(current);
        }
        self.listing.update_items(|items| {
            items.iter_mut().filter(|project| &project.id == id).for_each(&f);
        });
        for collection in [
            &mut self.my_projects,
            &mut self.mentee_projects,
            &mut self.favorite_projects,
        ] {
            collection
                .items_mut()
                .iter_mut()
                .filter(|project| &project.id == id)
                .for_each(&f);
        }
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Project actions
///
/// Commands carry the session token. Events carry the response and, for
/// fetches, the ticket of the request they answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    // Commands
    /// Fetch active or past projects, depending on the inactive toggle
    FetchCollection {
        /// Session token
        token: AuthToken,
    },
    /// Filter transition on the listing
    Filter(FilterAction),
    /// Pagination transition on the listing
    Page(PaginationAction),
    /// Switch between active and past projects and re-fetch
    ToggleInactive {
        /// Session token
        token: AuthToken,
    },
    /// Fetch one project into the detail slot
    FetchModel {
        /// Session token
        token: AuthToken,
        /// Project to fetch
        id: ProjectId,
    },
    /// Fetch the contributors of the current project
    FetchContributors {
        /// Session token
        token: AuthToken,
    },
    /// Replace the creation draft
    EditNewModel(NewProject),
    /// Clear the creation draft
    ResetNewModel,
    /// Create a project from the draft
    Create {
        /// Session token
        token: AuthToken,
    },
    /// Replace a project
    Update {
        /// Session token
        token: AuthToken,
        /// New attributes
        project: Project,
    },
    /// Delete a project
    Destroy {
        /// Session token
        token: AuthToken,
        /// Project to delete
        id: ProjectId,
    },
    /// Fetch the projects the user works on
    FetchMyProjects {
        /// Session token
        token: AuthToken,
    },
    /// Fetch the projects of the user's mentees
    FetchMenteeProjects {
        /// Session token
        token: AuthToken,
    },
    /// Fetch the projects the user starred
    FetchFavoriteProjects {
        /// Session token
        token: AuthToken,
        /// Logged-in user
        user_id: UserId,
    },
    /// Star the project if it is not a favorite, unstar it otherwise
    ToggleFavorite {
        /// Session token
        token: AuthToken,
        /// Logged-in user
        user_id: UserId,
        /// Project to toggle
        project: Project,
    },
    /// Mark the current project as a default project
    MarkDefault {
        /// Session token
        token: AuthToken,
    },
    /// Unmark the current project as a default project
    UnmarkDefault {
        /// Session token
        token: AuthToken,
    },
    /// Move the current project to the active projects
    MarkActive {
        /// Session token
        token: AuthToken,
    },
    /// Move the current project to the past projects
    MarkPast {
        /// Session token
        token: AuthToken,
    },

    // Events
    /// Listing response
    CollectionLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Projects
        projects: Vec<Project>,
    },
    /// Detail response
    ModelLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Project
        project: Project,
    },
    /// Contributors response
    ContributorsLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Contributors
        contributors: Vec<User>,
    },
    /// Project created
    Created {
        /// Request answered
        ticket: FetchTicket,
        /// Created project
        project: Project,
    },
    /// Project replaced
    Updated {
        /// Request answered
        ticket: FetchTicket,
        /// Stored project
        project: Project,
    },
    /// Project deleted
    Destroyed {
        /// Request answered
        ticket: FetchTicket,
        /// Deleted project
        id: ProjectId,
    },
    /// My projects response
    MyProjectsLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Projects
        projects: Vec<Project>,
    },
    /// Mentee projects response
    MenteeProjectsLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Projects
        projects: Vec<Project>,
    },
    /// Favorite projects response
    FavoriteProjectsLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Projects
        projects: Vec<Project>,
    },
    /// Favorite added or removed
    FavoriteToggled {
        /// Request answered
        ticket: FetchTicket,
        /// Toggled project
        project: Project,
        /// Whether it is now a favorite
        favorite: bool,
    },
    /// Default flag changed
    DefaultMarked {
        /// Request answered
        ticket: FetchTicket,
        /// Changed project
        id: ProjectId,
        /// New flag
        marked: bool,
    },
    /// Active flag changed
    ActiveMarked {
        /// Request answered
        ticket: FetchTicket,
        /// Changed project
        id: ProjectId,
        /// New flag
        active: bool,
    },
    /// A request failed
    RequestFailed {
        /// Failed operation
        operation: ProjectOperation,
        /// Request answered
        ticket: FetchTicket,
        /// Why
        error: ApiError,
    },
}

impl ProjectAction {
    /// Ticket of the request an event answers; `None` for commands
    #[must_use]
    pub const fn ticket(&self) -> Option<FetchTicket> {
        match self {
            Self::CollectionLoaded { ticket, .. }
            | Self::ModelLoaded { ticket, .. }
            | Self::ContributorsLoaded { ticket, .. }
            | Self::Created { ticket, .. }
            | Self::Updated { ticket, .. }
            | Self::Destroyed { ticket, .. }
            | Self::MyProjectsLoaded { ticket, .. }
            | Self::MenteeProjectsLoaded { ticket, .. }
            | Self::FavoriteProjectsLoaded { ticket, .. }
            | Self::FavoriteToggled { ticket, .. }
            | Self::DefaultMarked { ticket, .. }
            | Self::ActiveMarked { ticket, .. }
            | Self::RequestFailed { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}
