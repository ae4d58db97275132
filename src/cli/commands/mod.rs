//! CLI command implementations

pub mod config;
pub mod create;
pub mod delete;
pub mod list;

pub use config::execute as config;
pub use create::execute as create;
pub use delete::execute as delete;
pub use list::execute as list;

use crate::cache::QueryCache;
use crate::cli::args::QueryArgs;
use crate::config::Config;
use crate::model::{ListVariables, QueryKey};
use crate::query::QueryClient;
use crate::remote::create_store;

/// Cache key for a list query, command-line values over config defaults
pub(crate) fn query_key(config: &Config, args: &QueryArgs) -> QueryKey {
    let filter = args.filter.clone().or_else(|| config.list.filter.clone());
    let first = args.first.unwrap_or(config.list.page_size);
    QueryKey::new(config.list.query_name.clone(), ListVariables::new(filter, first))
}

/// Query client over the configured store and a fresh cache
pub(crate) fn query_client(config: &Config) -> QueryClient {
    QueryClient::new(create_store(config), QueryCache::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_key_prefers_arguments() {
        let mut config = Config::default();
        config.list.filter = Some("silver".into());
        config.list.page_size = 20;

        let key = query_key(&config, &QueryArgs::default());
        assert_eq!(key.variables.filter.as_deref(), Some("silver"));
        assert_eq!(key.variables.first, 20);

        let args = QueryArgs {
            filter: Some("gold".into()),
            first: Some(5),
        };
        let key = query_key(&config, &args);
        assert_eq!(key.variables.filter.as_deref(), Some("gold"));
        assert_eq!(key.variables.first, 5);
        assert_eq!(key.query_name, "itemList");
    }
}
