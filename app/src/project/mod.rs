//! Projects: filtered and paginated listing, detail page, contributors,
//! creation draft, personal lists, favorites and admin flags

pub mod reducer;
pub mod types;

pub use reducer::{PROJECTS_PATH, PROJECTS_ROUTE, ProjectReducer};
pub use types::{NewProject, Project, ProjectAction, ProjectId, ProjectOperation, ProjectState};
