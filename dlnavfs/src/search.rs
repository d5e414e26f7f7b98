//! Évaluation minimaliste des critères de recherche du ContentDirectory.
//!
//! Trois prédicats atomiques sont reconnus, joints par `) and (` :
//!
//! - `upnp:class = "<valeur>"`
//! - `upnp:class derivedfrom "<valeur>"`
//! - `res@protocolInfo contains "<valeur>"`
//!
//! Tout autre critère vaut vrai (match-all).

use crate::vfs::Resource;

const CLASS_MATCH: &str = "upnp:class = \"";
const CLASS_DERIVED: &str = "upnp:class derivedfrom \"";
const PROTOCOL_CONTAINS: &str = "res@protocolInfo contains \"";

/// Valeur entre guillemets d'un prédicat, après son mot-clef.
fn quoted_value(rest: &str) -> &str {
    rest.split('"').next().unwrap_or(rest)
}

fn atom_matches(resource: &Resource, atom: &str) -> bool {
    let atom = atom.trim().trim_start_matches('(');

    if let Some(rest) = atom.strip_prefix(CLASS_MATCH) {
        let wanted = quoted_value(rest);
        return resource
            .item
            .profile()
            .upnp_class()
            .is_some_and(|class| class == wanted);
    }
    if let Some(rest) = atom.strip_prefix(CLASS_DERIVED) {
        let wanted = quoted_value(rest);
        return resource
            .item
            .profile()
            .upnp_class()
            .is_some_and(|class| class.starts_with(wanted));
    }
    if let Some(rest) = atom.strip_prefix(PROTOCOL_CONTAINS) {
        let wanted = quoted_value(rest);
        return resource
            .resources
            .iter()
            .any(|res| res.protocol_info.to_protocol_string().contains(wanted));
    }

    // Critère inconnu : tout passe
    true
}

/// Une ressource satisfait-elle la conjonction des prédicats ?
pub fn matches(resource: &Resource, criteria: &str) -> bool {
    criteria
        .split(") and (")
        .all(|atom| atom_matches(resource, atom))
}
