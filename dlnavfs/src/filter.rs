//! Filtre d'attributs des réponses Browse/Search.
//!
//! Le filtre est soit `*` (tout émettre), soit une liste de noms
//! d'éléments/attributs séparés par des virgules ; un nom d'attribut est
//! préfixé de `@`. Titre, classe, id, parentID et restricted sont émis
//! quel que soit le filtre.

/// Filtre compilé d'une requête Browse/Search.
#[derive(Debug, Clone)]
pub struct Filter {
    all: bool,
    tokens: Vec<String>,
}

impl Filter {
    pub fn new(filter: &str) -> Self {
        if filter == "*" {
            return Self { all: true, tokens: Vec::new() };
        }
        Self {
            all: false,
            tokens: filter
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    /// Tout est demandé (`*`).
    pub fn is_all(&self) -> bool {
        self.all
    }

    /// Le champ `val` est-il demandé ? Un attribut se cherche sous la
    /// forme `@attr` : il est accepté si un jeton le porte, directement
    /// (`@size`) ou accroché à son élément (`res@size`).
    pub fn has(&self, val: &str) -> bool {
        if self.all {
            return true;
        }
        self.tokens.iter().any(|token| {
            if let Some(attr) = val.strip_prefix('@') {
                match token.find('@') {
                    Some(at) => token[at + 1..].starts_with(attr) || token[at..].starts_with(val),
                    None => false,
                }
            } else {
                token.starts_with(val)
            }
        })
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new("*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_everything() {
        let filter = Filter::new("*");
        assert!(filter.has("res"));
        assert!(filter.has("@size"));
        assert!(filter.has("upnp:album"));
    }

    #[test]
    fn test_explicit_elements() {
        let filter = Filter::new("dc:creator,res,upnp:album");
        assert!(filter.has("dc:creator"));
        assert!(filter.has("res"));
        assert!(filter.has("upnp:album"));
        assert!(!filter.has("upnp:genre"));
    }

    #[test]
    fn test_attribute_tokens() {
        let filter = Filter::new("res@size,@duration");
        assert!(filter.has("@size"));
        assert!(filter.has("@duration"));
        assert!(!filter.has("@bitrate"));
    }
}
