use tracing::debug;

use crate::host::{Hierarchy, Host, HostError, Id};
use crate::trail::TrailBuilder;

/// Appends the ancestors of `id`, root first, as non-active crumbs.
///
/// `id` itself is never appended. An ancestor whose name or link can't be resolved is skipped
/// and the rest of the chain is still appended.
pub fn push_ancestors<'h, H>(
    host: &H,
    id: Id,
    hierarchy: Hierarchy<'_>,
    mut trail: TrailBuilder<'h>,
) -> TrailBuilder<'h>
where
    H: Host + ?Sized,
{
    let ancestors = match host.ancestors(id, hierarchy) {
        Ok(ancestors) => ancestors,
        Err(err) => {
            debug!(id, ?hierarchy, %err, "failed to resolve ancestors");
            return trail;
        }
    };

    for ancestor in ancestors.into_iter().rev() {
        let resolved = match hierarchy {
            Hierarchy::Taxonomy(_) => host
                .term(ancestor)
                .and_then(|term| Ok((host.term_link(&term)?, term.name))),
            Hierarchy::PostType(_) => host
                .title(ancestor)
                .ok_or(HostError::NotFound {
                    kind: "post title",
                    id: ancestor,
                })
                .and_then(|title| Ok((host.permalink(ancestor)?, title))),
        };

        match resolved {
            Ok((link, name)) => trail = trail.crumb(&name, link, false, Some(ancestor)),
            Err(err) => debug!(id, ancestor, %err, "skipping unresolvable ancestor"),
        }
    }

    trail
}
