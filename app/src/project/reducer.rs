//! Project reducer
//!
//! Every request is an `Effect::Future` that resolves to a completion event
//! or to [`ProjectAction::RequestFailed`], echoing the ticket of the request.
//! Fetches take their ticket from the collection they fill. Saves draw
//! theirs from one shared issuer.

use super::types::{Project, ProjectAction, ProjectId, ProjectOperation, ProjectState};
use crate::auth::UserId;
use crate::environment::AppEnvironment;
use mentorhub_api::{ApiError, ApiRequest, AuthToken};
use mentorhub_collections::{FetchTicket, ListingAction};
use mentorhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Active projects, and the root of the project routes
pub const PROJECTS_PATH: &str = "/api/projects";
/// Route shown after a project is created
pub const PROJECTS_ROUTE: &str = "/projects";

fn project_path(id: &ProjectId) -> String {
    format!("{PROJECTS_PATH}/{id}")
}

fn favorite_path(user_id: &UserId, project_id: &ProjectId) -> String {
    format!("/api/users/{user_id}/favorite/{project_id}")
}

type Effects = SmallVec<[Effect<ProjectAction>; 4]>;

/// Reducer for the project module
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectReducer;

impl ProjectReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Perform `request`, decode the body as `T` and map it with `on_success`
    fn call<T, F>(
        env: &AppEnvironment,
        request: ApiRequest,
        operation: ProjectOperation,
        ticket: FetchTicket,
        on_success: F,
    ) -> Effect<ProjectAction>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(T) -> ProjectAction + Send + 'static,
    {
        tracing::debug!(
            %operation,
            generation = ticket.generation(),
            method = %request.method,
            path = %request.path,
            "Project request"
        );
        let api = Arc::clone(&env.api);
        async_effect! {
            let result = match api.send(request).await {
                Ok(json) => serde_json::from_value::<T>(json).map_err(ApiError::from),
                Err(error) => Err(error),
            };
            Some(match result {
                Ok(body) => on_success(body),
                Err(error) => ProjectAction::RequestFailed { operation, ticket, error },
            })
        }
    }

    fn fetch_collection(
        state: &mut ProjectState,
        env: &AppEnvironment,
        token: AuthToken,
    ) -> Effects {
        let path = if state.listing.showing_inactive() {
            format!("{PROJECTS_PATH}/past")
        } else {
            PROJECTS_PATH.to_string()
        };
        let ticket = state.listing.begin_fetch();

        smallvec![Self::call(
            env,
            ApiRequest::get(path).with_token(token),
            ProjectOperation::FetchCollection,
            ticket,
            move |projects| ProjectAction::CollectionLoaded { ticket, projects },
        )]
    }

    /// Id of the current project, or a warning when none is loaded
    fn current_id(state: &ProjectState, operation: ProjectOperation) -> Option<ProjectId> {
        let id = state.current.model().map(|project| project.id.clone());
        if id.is_none() {
            tracing::warn!(%operation, "No project loaded");
        }
        id
    }

    /// `PUT /api/projects/:id/<route>` on the current project
    fn mark(
        state: &mut ProjectState,
        env: &AppEnvironment,
        token: AuthToken,
        operation: ProjectOperation,
        route: &str,
        on_success: fn(FetchTicket, ProjectId) -> ProjectAction,
    ) -> Effects {
        let Some(id) = Self::current_id(state, operation) else {
            return SmallVec::new();
        };
        let ticket = state.mutations.issue();

        let request = ApiRequest::put(format!("{}/{route}", project_path(&id))).with_token(token);
        smallvec![Self::call(env, request, operation, ticket, move |_: Value| {
            on_success(ticket, id)
        })]
    }

    /// Body of a successful update: the stored project when the server sends
    /// it back, the sent one when it only acknowledges
    fn stored_project(body: Value, sent: Project) -> Project {
        match serde_json::from_value::<Project>(body) {
            Ok(stored) if stored.id == sent.id => stored,
            _ => sent,
        }
    }
}

impl Reducer for ProjectReducer {
    type State = ProjectState;
    type Action = ProjectAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Listing ==========
            ProjectAction::FetchCollection { token } => Self::fetch_collection(state, env, token),

            ProjectAction::ToggleInactive { token } => {
                let showing = state.listing.toggle_inactive();
                tracing::debug!(?showing, "Toggled inactive projects");
                Self::fetch_collection(state, env, token)
            },

            ProjectAction::Filter(filter) => {
                state.listing.apply(ListingAction::Filter(filter));
                SmallVec::new()
            },

            ProjectAction::Page(page) => {
                state.listing.apply(ListingAction::Page(page));
                SmallVec::new()
            },

            ProjectAction::CollectionLoaded { ticket, projects } => {
                if state.listing.complete_fetch(ticket, projects) {
                    tracing::debug!(
                        count = state.listing.collection().len(),
                        "Projects loaded"
                    );
                }
                SmallVec::new()
            },

            // ========== Current project ==========
            ProjectAction::FetchModel { token, id } => {
                let ticket = state.current.begin_fetch();
                smallvec![Self::call(
                    env,
                    ApiRequest::get(project_path(&id)).with_token(token),
                    ProjectOperation::FetchModel,
                    ticket,
                    move |project| ProjectAction::ModelLoaded { ticket, project },
                )]
            },

            ProjectAction::ModelLoaded { ticket, project } => {
                let id = project.id.clone();
                if state.current.complete_fetch(ticket, project) {
                    tracing::debug!(project = %id, "Project loaded");
                }
                SmallVec::new()
            },

            ProjectAction::FetchContributors { token } => {
                let Some(id) = Self::current_id(state, ProjectOperation::FetchContributors) else {
                    return SmallVec::new();
                };
                let ticket = state.contributors.begin_fetch();
                smallvec![Self::call(
                    env,
                    ApiRequest::get(format!("{}/authors", project_path(&id))).with_token(token),
                    ProjectOperation::FetchContributors,
                    ticket,
                    move |contributors| ProjectAction::ContributorsLoaded { ticket, contributors },
                )]
            },

            ProjectAction::ContributorsLoaded { ticket, contributors } => {
                state.contributors.complete_fetch(ticket, contributors);
                SmallVec::new()
            },

            // ========== Create / update / destroy ==========
            ProjectAction::EditNewModel(draft) => {
                state.new_model.set_draft(draft);
                SmallVec::new()
            },

            ProjectAction::ResetNewModel => {
                state.new_model.reset();
                SmallVec::new()
            },

            ProjectAction::Create { token } => {
                let body = match serde_json::to_value(state.new_model.draft()) {
                    Ok(body) => body,
                    Err(error) => {
                        let error = ApiError::from(error);
                        tracing::warn!(%error, "Project draft could not be encoded");
                        state.last_error = Some(error);
                        return SmallVec::new();
                    },
                };

                let ticket = state.mutations.issue();
                smallvec![Self::call(
                    env,
                    ApiRequest::post(PROJECTS_PATH).with_token(token).with_body(body),
                    ProjectOperation::Create,
                    ticket,
                    move |project| ProjectAction::Created { ticket, project },
                )]
            },

            ProjectAction::Created { project, .. } => {
                tracing::info!(project = %project.id, name = %project.name, "Project created");
                state.mutations.settle();
                state.new_model.reset();

                let navigator = Arc::clone(&env.navigator);
                smallvec![async_effect! {
                    navigator.navigate_to(PROJECTS_ROUTE);
                    None
                }]
            },

            ProjectAction::Update { token, project } => {
                let body = match serde_json::to_value(&project) {
                    Ok(body) => body,
                    Err(error) => {
                        state.last_error = Some(ApiError::from(error));
                        return SmallVec::new();
                    },
                };

                let request = ApiRequest::put(project_path(&project.id))
                    .with_token(token)
                    .with_body(body);
                let ticket = state.mutations.issue();
                smallvec![Self::call(
                    env,
                    request,
                    ProjectOperation::Update,
                    ticket,
                    move |body: Value| ProjectAction::Updated {
                        ticket,
                        project: Self::stored_project(body, project),
                    },
                )]
            },

            ProjectAction::Updated { project, .. } => {
                state.mutations.settle();
                let id = project.id.clone();
                state.update_project(&id, |stored| stored.clone_from(&project));
                tracing::debug!(project = %id, "Project updated");
                SmallVec::new()
            },

            ProjectAction::Destroy { token, id } => {
                let ticket = state.mutations.issue();
                let request = ApiRequest::delete(project_path(&id)).with_token(token);
                smallvec![Self::call(
                    env,
                    request,
                    ProjectOperation::Destroy,
                    ticket,
                    move |_: Value| ProjectAction::Destroyed { ticket, id },
                )]
            },

            ProjectAction::Destroyed { id, .. } => {
                state.mutations.settle();
                state.listing.update_items(|items| items.retain(|project| project.id != id));
                for collection in [
                    &mut state.my_projects,
                    &mut state.mentee_projects,
                    &mut state.favorite_projects,
                ] {
                    collection.items_mut().retain(|project| project.id != id);
                }
                if state.current.model().is_some_and(|project| project.id == id) {
                    state.current.clear();
                }
                tracing::info!(project = %id, "Project deleted");
                SmallVec::new()
            },

            // ========== Personal lists ==========
            ProjectAction::FetchMyProjects { token } => {
                let ticket = state.my_projects.begin_fetch();
                smallvec![Self::call(
                    env,
                    ApiRequest::get(format!("{PROJECTS_PATH}/mine")).with_token(token),
                    ProjectOperation::FetchMyProjects,
                    ticket,
                    move |projects| ProjectAction::MyProjectsLoaded { ticket, projects },
                )]
            },

            ProjectAction::MyProjectsLoaded { ticket, projects } => {
                state.my_projects.complete_fetch(ticket, projects);
                SmallVec::new()
            },

            ProjectAction::FetchMenteeProjects { token } => {
                let ticket = state.mentee_projects.begin_fetch();
                smallvec![Self::call(
                    env,
                    ApiRequest::get(format!("{PROJECTS_PATH}/mentees")).with_token(token),
                    ProjectOperation::FetchMenteeProjects,
                    ticket,
                    move |projects| ProjectAction::MenteeProjectsLoaded { ticket, projects },
                )]
            },

            ProjectAction::MenteeProjectsLoaded { ticket, projects } => {
                state.mentee_projects.complete_fetch(ticket, projects);
                SmallVec::new()
            },

            ProjectAction::FetchFavoriteProjects { token, user_id } => {
                let ticket = state.favorite_projects.begin_fetch();
                let path = format!("/api/users/{user_id}/favoriteProjects");
                smallvec![Self::call(
                    env,
                    ApiRequest::get(path).with_token(token),
                    ProjectOperation::FetchFavoriteProjects,
                    ticket,
                    move |projects| ProjectAction::FavoriteProjectsLoaded { ticket, projects },
                )]
            },

            ProjectAction::FavoriteProjectsLoaded { ticket, projects } => {
                state.favorite_projects.complete_fetch(ticket, projects);
                SmallVec::new()
            },

            ProjectAction::ToggleFavorite {
                token,
                user_id,
                project,
            } => {
                let ticket = state.mutations.issue();
                let favorite = !state.is_favorite(&project.id);
                let path = favorite_path(&user_id, &project.id);
                let request = if favorite {
                    ApiRequest::put(path)
                } else {
                    ApiRequest::delete(path)
                };

                tracing::debug!(project = %project.id, favorite, "Toggling favorite");
                smallvec![Self::call(
                    env,
                    request.with_token(token),
                    ProjectOperation::ToggleFavorite,
                    ticket,
                    move |_: Value| ProjectAction::FavoriteToggled {
                        ticket,
                        project,
                        favorite,
                    },
                )]
            },

            ProjectAction::FavoriteToggled {
                project, favorite, ..
            } => {
                state.mutations.settle();
                let favorites = state.favorite_projects.items_mut();
                favorites.retain(|stored| stored.id != project.id);
                if favorite {
                    favorites.push(project);
                }
                SmallVec::new()
            },

            // ========== Flags on the current project ==========
            ProjectAction::MarkDefault { token } => Self::mark(
                state,
                env,
                token,
                ProjectOperation::MarkDefault,
                "markdefault",
                |ticket, id| ProjectAction::DefaultMarked {
                    ticket,
                    id,
                    marked: true,
                },
            ),

            ProjectAction::UnmarkDefault { token } => Self::mark(
                state,
                env,
                token,
                ProjectOperation::UnmarkDefault,
                "unmarkdefault",
                |ticket, id| ProjectAction::DefaultMarked {
                    ticket,
                    id,
                    marked: false,
                },
            ),

            ProjectAction::MarkActive { token } => Self::mark(
                state,
                env,
                token,
                ProjectOperation::MarkActive,
                "markActive",
                |ticket, id| ProjectAction::ActiveMarked {
                    ticket,
                    id,
                    active: true,
                },
            ),

            ProjectAction::MarkPast { token } => Self::mark(
                state,
                env,
                token,
                ProjectOperation::MarkPast,
                "markPast",
                |ticket, id| ProjectAction::ActiveMarked {
                    ticket,
                    id,
                    active: false,
                },
            ),

            ProjectAction::DefaultMarked { id, marked, .. } => {
                state.mutations.settle();
                state.update_project(&id, |project| project.marked_default = marked);
                SmallVec::new()
            },

            ProjectAction::ActiveMarked { id, active, .. } => {
                state.mutations.settle();
                state.update_project(&id, |project| project.active = active);
                SmallVec::new()
            },

            // ========== Failures ==========
            ProjectAction::RequestFailed {
                operation,
                ticket,
                error,
            } => {
                if state.settle_failure(operation, ticket) {
                    tracing::warn!(%operation, %error, "Project request failed");
                    state.last_error = Some(error);
                } else {
                    tracing::debug!(%operation, "Dropping stale failure");
                }
                SmallVec::new()
            },
        }
    }
}
