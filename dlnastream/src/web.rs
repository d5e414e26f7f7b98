//! Chaîne de handlers HTTP du serveur d'origine.
//!
//! Chaque répertoire virtuel enregistre un handler sous un préfixe d'URL ;
//! les URLs entrantes sont confrontées aux handlers dans l'ordre
//! d'enregistrement et le premier qui produit un flux gagne. Le device
//! installe ainsi `/services/*` (SCPD), le protocole HTTP `/web/*`
//! (ressources par id) et le VFS `/didl` (export DIDL).

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::stream::DlnaStream;

/// Handler d'un répertoire virtuel HTTP.
pub trait HttpHandler: Send + Sync {
    /// Produit le flux de la ressource désignée par `url`, ou `None` si
    /// l'URL n'appartient pas à ce handler.
    fn open(&self, url: &str) -> Option<DlnaStream>;
}

/// Chaîne ordonnée de handlers, confrontée par préfixe d'URL.
#[derive(Default)]
pub struct WebHandlerChain {
    handlers: RwLock<Vec<(String, Arc<dyn HttpHandler>)>>,
}

impl WebHandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un handler pour un préfixe d'URL. L'ordre
    /// d'enregistrement est l'ordre de résolution.
    pub fn register(&self, prefix: &str, handler: Arc<dyn HttpHandler>) {
        debug!("🔗 virtual dir registered: {}", prefix);
        self.handlers.write().push((prefix.to_string(), handler));
    }

    /// Liste des préfixes enregistrés, dans l'ordre.
    pub fn prefixes(&self) -> Vec<String> {
        self.handlers.read().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Résout une URL entrante contre la chaîne.
    pub fn open(&self, url: &str) -> Option<DlnaStream> {
        let handlers = self.handlers.read();
        for (prefix, handler) in handlers.iter() {
            if url.starts_with(prefix.as_str()) {
                if let Some(stream) = handler.open(url) {
                    return Some(stream);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::memory_open;

    struct FixedHandler(&'static str);

    impl HttpHandler for FixedHandler {
        fn open(&self, url: &str) -> Option<DlnaStream> {
            Some(memory_open(url, self.0.as_bytes().to_vec(), "text/plain"))
        }
    }

    #[test]
    fn test_prefix_resolution_order() {
        let chain = WebHandlerChain::new();
        chain.register("/services", Arc::new(FixedHandler("scpd")));
        chain.register("/web", Arc::new(FixedHandler("media")));

        let mut stream = chain.open("/web/42.mp3").unwrap();
        assert_eq!(stream.read_to_end().unwrap(), b"media");

        assert!(chain.open("/unknown/1").is_none());
    }
}
