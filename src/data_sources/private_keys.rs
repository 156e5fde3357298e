use crate::client::models::PrivateKey;
use crate::client::Collection;
use crate::resources::private_key::PrivateKeyResource;
use crate::resources::Resource;
use crate::schema::Schema;

use super::{computed_view, Listing};

/// Private keys, listed or looked up.
pub struct PrivateKeys;

impl Listing for PrivateKeys {
    type Wire = PrivateKey;

    const COLLECTION: Collection = Collection::PrivateKeys;
    const LABEL: &'static str = "private key";
    const SINGLE: &'static str = "coolify_private_key";
    const LIST: &'static str = "coolify_private_keys";
    const LIST_KEY: &'static str = "private_keys";
    const FILTERS: &'static [&'static str] = &["name", "description", "team_id", "is_git_related"];
    const SENSITIVE: &'static [&'static str] = &["private_key"];

    fn attributes() -> Schema {
        computed_view(PrivateKeyResource::schema())
    }
}
