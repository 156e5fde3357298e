use crate::client::models::Project;
use crate::client::Collection;
use crate::resources::project::ProjectResource;
use crate::resources::Resource;
use crate::schema::Schema;

use super::{computed_view, Listing};

/// Projects, listed or looked up. Records carry their environments.
pub struct Projects;

impl Listing for Projects {
    type Wire = Project;

    const COLLECTION: Collection = Collection::Projects;
    const LABEL: &'static str = "project";
    const SINGLE: &'static str = "coolify_project";
    const LIST: &'static str = "coolify_projects";
    const LIST_KEY: &'static str = "projects";
    const FILTERS: &'static [&'static str] = &["id", "uuid", "name", "description"];

    fn attributes() -> Schema {
        computed_view(ProjectResource::schema())
    }
}
