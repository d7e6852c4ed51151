//! Read-only listing and lookup.

use crate::cli::ListArgs;
use crate::output;
use crate::Context;
use deadmanssnitch::{Client, Result, SnitchQuery};

fn query_from_args(args: &ListArgs) -> SnitchQuery {
    if let Some(id) = &args.id {
        SnitchQuery::ById(id.clone())
    } else if let Some(name) = &args.name {
        SnitchQuery::ByName(name.clone())
    } else if args.tags.is_empty() {
        SnitchQuery::All
    } else {
        SnitchQuery::ByTags(args.tags.clone())
    }
}

pub fn list(ctx: &Context, client: &Client, args: &ListArgs) -> Result<()> {
    let found = client.find(&query_from_args(args))?;
    output::snitches(&found, ctx.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_to_all() {
        let args = ListArgs {
            name: None,
            id: None,
            tags: vec![],
        };
        assert_eq!(query_from_args(&args), SnitchQuery::All);
    }

    #[test]
    fn test_query_by_id() {
        let args = ListArgs {
            name: None,
            id: Some("abc".to_string()),
            tags: vec![],
        };
        assert_eq!(query_from_args(&args), SnitchQuery::ById("abc".to_string()));
    }

    #[test]
    fn test_query_by_tags() {
        let args = ListArgs {
            name: None,
            id: None,
            tags: vec!["prod".to_string(), "db".to_string()],
        };
        assert_eq!(
            query_from_args(&args),
            SnitchQuery::ByTags(vec!["prod".to_string(), "db".to_string()])
        );
    }
}
