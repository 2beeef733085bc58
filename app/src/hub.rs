//! Facade over the application store
//!
//! [`Hub`] turns each feature operation into one `async fn` returning a
//! `Result`. It reads the session token and user id from the auth state,
//! sends the command, waits for the completion action and maps
//! `...Failed` actions to [`AppError::Api`].

use crate::app::{AppAction, AppReducer, AppState};
use crate::auth::{AuthAction, Credentials, User, UserId};
use crate::config::AppConfig;
use crate::environment::{AppEnvironment, LoggingNavigator};
use crate::error::AppError;
use crate::notification::{Notification, NotificationAction, NotificationId};
use crate::project::{NewProject, Project, ProjectAction, ProjectId, ProjectOperation};
use crate::user_registration::{Registration, RegistrationAction};
use mentorhub_api::{AuthToken, HttpApiClient};
use mentorhub_collections::{FetchTicket, FilterAction, PageLink, PaginationAction};
use mentorhub_runtime::Store;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// Store running the application reducer
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Application facade
#[derive(Clone)]
pub struct Hub {
    store: AppStore,
    config: AppConfig,
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Hub {
    /// Hub talking HTTP to `config.api_url`, logging route changes
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let api = HttpApiClient::new(config.api_config())?;
        let env = AppEnvironment::new(Arc::new(api), Arc::new(LoggingNavigator))
            .with_notification_timeout(config.notification_timeout);
        Ok(Self::with_environment(config, env))
    }

    /// Hub with injected collaborators
    #[must_use]
    pub fn with_environment(config: AppConfig, env: AppEnvironment) -> Self {
        let store = Store::new(AppState::new(config.page_size), AppReducer::new(), env);
        Self { store, config }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &AppStore {
        &self.store
    }

    /// Read application state through `f`
    pub async fn state<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        self.store.state(f).await
    }

    /// Stop accepting actions and wait for running effects
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if effects are still running after
    /// `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AppError> {
        Ok(self.store.shutdown(timeout).await?)
    }

    // ========== Plumbing ==========

    async fn token(&self) -> Result<AuthToken, AppError> {
        self.state(|state| state.auth.token().cloned())
            .await
            .ok_or(AppError::NotAuthenticated)
    }

    async fn user_id(&self) -> Result<UserId, AppError> {
        self.state(|state| state.auth.current_user().map(|user| user.id.clone()))
            .await
            .ok_or(AppError::NotAuthenticated)
    }

    async fn require_current_project(&self) -> Result<(), AppError> {
        if self.state(|state| state.projects.current().is_some()).await {
            Ok(())
        } else {
            Err(AppError::NoCurrentProject)
        }
    }

    async fn send(&self, action: impl Into<AppAction>) -> Result<(), AppError> {
        self.store.send(action.into()).await?;
        Ok(())
    }

    /// Send `action` and wait for the first action accepted by `is_outcome`
    async fn request(
        &self,
        action: impl Into<AppAction>,
        is_outcome: impl Fn(&AppAction) -> bool,
    ) -> Result<AppAction, AppError> {
        let outcome = self
            .store
            .send_and_wait_for(action.into(), is_outcome, self.config.request_timeout)
            .await?;

        match outcome {
            AppAction::Auth(
                AuthAction::LoginFailed { error } | AuthAction::ProfileFailed { error, .. },
            )
            | AppAction::Registration(RegistrationAction::RegisterFailed { error }) => {
                Err(error.into())
            },
            outcome => Ok(outcome),
        }
    }

    /// Run a project request and extract its success action
    ///
    /// The ticket the command takes is read under the store lock, and only
    /// events echoing it end the wait. Responses to earlier or concurrent
    /// requests of the same kind are never mistaken for this one. A
    /// `RequestFailed` for this ticket ends the wait with its error.
    async fn project_request<T>(
        &self,
        action: ProjectAction,
        operation: ProjectOperation,
        extract: fn(&ProjectAction) -> Option<T>,
    ) -> Result<T, AppError> {
        let outcome = self
            .store
            .send_and_wait_keyed(
                action.into(),
                move |state: &AppState| state.projects.latest_ticket(operation),
                move |ticket: &Option<FetchTicket>, outcome: &AppAction| {
                    let AppAction::Project(action) = outcome else {
                        return false;
                    };
                    if ticket.is_none() || action.ticket() != *ticket {
                        return false;
                    }
                    match action {
                        ProjectAction::RequestFailed {
                            operation: failed, ..
                        } => *failed == operation,
                        action => extract(action).is_some(),
                    }
                },
                self.config.request_timeout,
            )
            .await?;

        match outcome {
            AppAction::Project(ProjectAction::RequestFailed { error, .. }) => Err(error.into()),
            AppAction::Project(action) => extract(&action)
                .ok_or_else(|| AppError::UnexpectedOutcome(format!("{action:?}"))),
            outcome => Err(AppError::UnexpectedOutcome(format!("{outcome:?}"))),
        }
    }

    async fn page(&self) -> Vec<Project> {
        self.state(|state| state.projects.listing().page().to_vec()).await
    }

    async fn listing(&self, action: ProjectAction) -> Result<Vec<Project>, AppError> {
        self.send(action).await?;
        Ok(self.page().await)
    }

    // ========== Auth ==========

    /// Log in and load the user's profile
    ///
    /// # Errors
    ///
    /// [`AppError::Api`] if the login or the profile request fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let outcome = self
            .request(
                AuthAction::Login {
                    credentials: Credentials::new(email, password),
                },
                |action| {
                    matches!(
                        action,
                        AppAction::Auth(
                            AuthAction::ProfileLoaded { .. }
                                | AuthAction::ProfileFailed { .. }
                                | AuthAction::LoginFailed { .. }
                        )
                    )
                },
            )
            .await?;

        match outcome {
            AppAction::Auth(AuthAction::ProfileLoaded { user, .. }) => Ok(user),
            outcome => Err(AppError::UnexpectedOutcome(format!("{outcome:?}"))),
        }
    }

    /// Drop the session
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.send(AuthAction::Logout).await
    }

    /// Logged-in user, if the profile is loaded
    pub async fn current_user(&self) -> Option<User> {
        self.state(|state| state.auth.current_user().cloned()).await
    }

    // ========== Registration ==========

    /// Replace the registration draft
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn edit_registration(&self, registration: Registration) -> Result<(), AppError> {
        self.send(RegistrationAction::SetDraft(registration)).await
    }

    /// Submit the registration draft and log the new user in
    ///
    /// # Errors
    ///
    /// [`AppError::Api`] if the registration or the profile request fails.
    pub async fn register(&self) -> Result<User, AppError> {
        let outcome = self
            .request(RegistrationAction::Register, |action| {
                matches!(
                    action,
                    AppAction::Registration(RegistrationAction::RegisterFailed { .. })
                        | AppAction::Auth(
                            AuthAction::ProfileLoaded { .. } | AuthAction::ProfileFailed { .. }
                        )
                )
            })
            .await?;

        match outcome {
            AppAction::Auth(AuthAction::ProfileLoaded { user, .. }) => Ok(user),
            outcome => Err(AppError::UnexpectedOutcome(format!("{outcome:?}"))),
        }
    }

    // ========== Project listing ==========

    /// Fetch the listing (active or past projects) and return the first page
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn fetch_projects(&self) -> Result<Vec<Project>, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::FetchCollection { token },
            ProjectOperation::FetchCollection,
            |action| matches!(action, ProjectAction::CollectionLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self.page().await)
    }

    /// Switch between active and past projects, re-fetch and return the page
    ///
    /// # Errors
    ///
    /// Same as [`Hub::fetch_projects`].
    pub async fn toggle_inactive(&self) -> Result<Vec<Project>, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::ToggleInactive { token },
            ProjectOperation::FetchCollection,
            |action| matches!(action, ProjectAction::CollectionLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self.page().await)
    }

    /// Filter the listing by name and return the page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn set_filter(&self, query: &str) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Filter(FilterAction::SetFilter(query.to_string())))
            .await
    }

    /// Flip the sort direction and return the page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn toggle_order_by(&self) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Filter(FilterAction::ToggleOrderBy))
            .await
    }

    /// Change the page size and return the page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn set_page_size(&self, page_size: NonZeroUsize) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::SetPageSize(page_size)))
            .await
    }

    /// Jump to `page` and return it
    ///
    /// A page past the end yields an empty window, which resets the
    /// listing to page 1. Page 0 is treated as page 1.
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn go_to_page(&self, page: usize) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::GoToPage(page)))
            .await
    }

    /// Previous page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn prev_page(&self) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::PrevPage)).await
    }

    /// Next page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn next_page(&self) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::NextPage)).await
    }

    /// First page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn first_page(&self) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::FirstPage)).await
    }

    /// Last page
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn last_page(&self) -> Result<Vec<Project>, AppError> {
        self.listing(ProjectAction::Page(PaginationAction::LastPage)).await
    }

    /// Page links of the listing
    pub async fn pages(&self) -> Vec<PageLink> {
        self.state(|state| state.projects.listing().pages()).await
    }

    // ========== Current project ==========

    /// Load project `id` into the detail slot
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn fetch_project(&self, id: ProjectId) -> Result<Project, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::FetchModel { token, id },
            ProjectOperation::FetchModel,
            |action| match action {
                ProjectAction::ModelLoaded { project, .. } => Some(project.clone()),
                _ => None,
            },
        )
        .await
    }

    /// Load the contributors of the current project
    ///
    /// # Errors
    ///
    /// [`AppError::NoCurrentProject`] if no project is loaded,
    /// [`AppError::Api`] if the request fails.
    pub async fn fetch_contributors(&self) -> Result<Vec<User>, AppError> {
        let token = self.token().await?;
        self.require_current_project().await?;
        self.project_request(
            ProjectAction::FetchContributors { token },
            ProjectOperation::FetchContributors,
            |action| matches!(action, ProjectAction::ContributorsLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self
            .state(|state| state.projects.contributors().items().to_vec())
            .await)
    }

    // ========== Create / update / destroy ==========

    /// Replace the creation draft
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn edit_new_project(&self, draft: NewProject) -> Result<(), AppError> {
        self.send(ProjectAction::EditNewModel(draft)).await
    }

    /// Clear the creation draft
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn reset_new_project(&self) -> Result<(), AppError> {
        self.send(ProjectAction::ResetNewModel).await
    }

    /// Create a project from the draft
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn create_project(&self) -> Result<Project, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::Create { token },
            ProjectOperation::Create,
            |action| match action {
                ProjectAction::Created { project, .. } => Some(project.clone()),
                _ => None,
            },
        )
        .await
    }

    /// Replace `project` on the server
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn update_project(&self, project: Project) -> Result<Project, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::Update { token, project },
            ProjectOperation::Update,
            |action| match action {
                ProjectAction::Updated { project, .. } => Some(project.clone()),
                _ => None,
            },
        )
        .await
    }

    /// Delete project `id`
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn destroy_project(&self, id: ProjectId) -> Result<(), AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::Destroy { token, id },
            ProjectOperation::Destroy,
            |action| matches!(action, ProjectAction::Destroyed { .. }).then_some(()),
        )
        .await?;
        Ok(())
    }

    // ========== Personal lists ==========

    /// Fetch the projects the user works on
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn fetch_my_projects(&self) -> Result<Vec<Project>, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::FetchMyProjects { token },
            ProjectOperation::FetchMyProjects,
            |action| matches!(action, ProjectAction::MyProjectsLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self
            .state(|state| state.projects.my_projects().items().to_vec())
            .await)
    }

    /// Fetch the projects of the user's mentees
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a session, [`AppError::Api`]
    /// if the request fails.
    pub async fn fetch_mentee_projects(&self) -> Result<Vec<Project>, AppError> {
        let token = self.token().await?;
        self.project_request(
            ProjectAction::FetchMenteeProjects { token },
            ProjectOperation::FetchMenteeProjects,
            |action| matches!(action, ProjectAction::MenteeProjectsLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self
            .state(|state| state.projects.mentee_projects().items().to_vec())
            .await)
    }

    /// Fetch the projects the user starred
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a loaded profile,
    /// [`AppError::Api`] if the request fails.
    pub async fn fetch_favorite_projects(&self) -> Result<Vec<Project>, AppError> {
        let token = self.token().await?;
        let user_id = self.user_id().await?;
        self.project_request(
            ProjectAction::FetchFavoriteProjects { token, user_id },
            ProjectOperation::FetchFavoriteProjects,
            |action| matches!(action, ProjectAction::FavoriteProjectsLoaded { .. }).then_some(()),
        )
        .await?;
        Ok(self
            .state(|state| state.projects.favorite_projects().items().to_vec())
            .await)
    }

    /// Star or unstar `project`; returns whether it is now a favorite
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] without a loaded profile,
    /// [`AppError::Api`] if the request fails.
    pub async fn toggle_favorite(&self, project: Project) -> Result<bool, AppError> {
        let token = self.token().await?;
        let user_id = self.user_id().await?;
        self.project_request(
            ProjectAction::ToggleFavorite {
                token,
                user_id,
                project,
            },
            ProjectOperation::ToggleFavorite,
            |action| match action {
                ProjectAction::FavoriteToggled { favorite, .. } => Some(*favorite),
                _ => None,
            },
        )
        .await
    }

    /// Whether the user starred project `id`
    pub async fn is_favorite(&self, id: &ProjectId) -> bool {
        self.state(|state| state.projects.is_favorite(id)).await
    }

    // ========== Flags on the current project ==========

    async fn mark(
        &self,
        action: fn(AuthToken) -> ProjectAction,
        operation: ProjectOperation,
        is_success: fn(&ProjectAction) -> Option<()>,
    ) -> Result<(), AppError> {
        let token = self.token().await?;
        self.require_current_project().await?;
        self.project_request(action(token), operation, is_success)
            .await
    }

    /// Mark the current project as a default project
    ///
    /// # Errors
    ///
    /// [`AppError::NoCurrentProject`] if no project is loaded,
    /// [`AppError::Api`] if the request fails.
    pub async fn mark_default(&self) -> Result<(), AppError> {
        self.mark(
            |token| ProjectAction::MarkDefault { token },
            ProjectOperation::MarkDefault,
            |action| {
                matches!(action, ProjectAction::DefaultMarked { marked: true, .. }).then_some(())
            },
        )
        .await
    }

    /// Unmark the current project as a default project
    ///
    /// # Errors
    ///
    /// [`AppError::NoCurrentProject`] if no project is loaded,
    /// [`AppError::Api`] if the request fails.
    pub async fn unmark_default(&self) -> Result<(), AppError> {
        self.mark(
            |token| ProjectAction::UnmarkDefault { token },
            ProjectOperation::UnmarkDefault,
            |action| {
                matches!(action, ProjectAction::DefaultMarked { marked: false, .. }).then_some(())
            },
        )
        .await
    }

    /// Move the current project to the active projects
    ///
    /// # Errors
    ///
    /// [`AppError::NoCurrentProject`] if no project is loaded,
    /// [`AppError::Api`] if the request fails.
    pub async fn mark_active(&self) -> Result<(), AppError> {
        self.mark(
            |token| ProjectAction::MarkActive { token },
            ProjectOperation::MarkActive,
            |action| {
                matches!(action, ProjectAction::ActiveMarked { active: true, .. }).then_some(())
            },
        )
        .await
    }

    /// Move the current project to the past projects
    ///
    /// # Errors
    ///
    /// [`AppError::NoCurrentProject`] if no project is loaded,
    /// [`AppError::Api`] if the request fails.
    pub async fn mark_past(&self) -> Result<(), AppError> {
        self.mark(
            |token| ProjectAction::MarkPast { token },
            ProjectOperation::MarkPast,
            |action| {
                matches!(action, ProjectAction::ActiveMarked { active: false, .. }).then_some(())
            },
        )
        .await
    }

    // ========== Notifications ==========

    /// Queued notifications, oldest first
    pub async fn notifications(&self) -> Vec<Notification> {
        self.state(|state| state.notifications.notifications().to_vec())
            .await
    }

    /// Remove notification `id`
    ///
    /// # Errors
    ///
    /// [`AppError::Store`] if the store is shutting down.
    pub async fn dismiss_notification(&self, id: NotificationId) -> Result<(), AppError> {
        self.send(NotificationAction::Dismiss { id }).await
    }
}
