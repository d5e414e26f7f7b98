//! Configuration du contrôleur.
//!
//! Les options peuvent venir d'un fichier YAML ou être posées par
//! programme. La normalisation applique les dépendances entre
//! capacités : le mode Xbox force UPnP A/V, le mode DLNA force la
//! vérification des extensions.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Capacités de compatibilité de la pile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Capabilities {
    /// Conformité UPnP A/V de base.
    pub upnp_av: bool,
    /// Conformité DLNA stricte.
    pub dlna: bool,
    /// Quirks d'interopérabilité Xbox 360.
    pub xbox: bool,
}

/// Niveaux de verbosité du journal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    None,
    Info,
    Warning,
    #[default]
    Error,
    Critical,
}

impl Verbosity {
    /// Directive `tracing` équivalente, consommée par les binaires.
    pub fn env_filter(&self) -> &'static str {
        match self {
            Verbosity::None => "off",
            Verbosity::Info => "info",
            Verbosity::Warning => "warn",
            Verbosity::Error => "error",
            Verbosity::Critical => "error",
        }
    }
}

fn default_interface() -> String {
    "lo".to_string()
}

fn default_friendly_name() -> String {
    "dlna".to_string()
}

/// Configuration du contrôleur DLNA.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DlnaConfig {
    /// Interface réseau à lier (doit exister et être active).
    pub interface: String,
    /// Port du serveur, 0 laisse la pile choisir.
    pub port: u16,
    pub capabilities: Capabilities,
    /// Filtrage des profilers par extension/MIME sniffé.
    pub check_extensions: bool,
    pub verbosity: Verbosity,
    /// Nom convivial publié dans le descripteur.
    pub friendly_name: String,
    /// UUID du device ; généré s'il est absent.
    pub uuid: Option<String>,
}

impl Default for DlnaConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            port: 0,
            capabilities: Capabilities::default(),
            check_extensions: false,
            verbosity: Verbosity::default(),
            friendly_name: default_friendly_name(),
            uuid: None,
        }
    }
}

impl DlnaConfig {
    /// Charge une configuration YAML.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: DlnaConfig = serde_yaml::from_str(&text)?;
        Ok(config.normalized())
    }

    /// Applique les dépendances entre options.
    pub fn normalized(mut self) -> Self {
        if self.capabilities.xbox {
            self.capabilities.upnp_av = true;
        }
        if self.capabilities.dlna {
            self.check_extensions = true;
        }
        self
    }

    /// Modes dérivés pour l'assemblage du device.
    pub fn device_mode(&self) -> dlnaupnp::devices::DeviceMode {
        dlnaupnp::devices::DeviceMode {
            dlna: self.capabilities.dlna,
            xbox: self.capabilities.xbox,
        }
    }

    /// Modes dérivés pour le VFS.
    pub fn vfs_mode(&self) -> dlnavfs::VfsMode {
        dlnavfs::VfsMode {
            dlna: self.capabilities.dlna,
            xbox: self.capabilities.xbox,
        }
    }

    /// UUID effectif : configuré ou généré.
    pub fn device_uuid(&self) -> String {
        self.uuid
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DlnaConfig::default();
        assert_eq!(config.interface, "lo");
        assert_eq!(config.port, 0);
        assert!(!config.check_extensions);
        assert_eq!(config.verbosity, Verbosity::Error);
    }

    #[test]
    fn test_xbox_forces_upnp_av() {
        let config = DlnaConfig {
            capabilities: Capabilities { upnp_av: false, dlna: false, xbox: true },
            ..DlnaConfig::default()
        }
        .normalized();
        assert!(config.capabilities.upnp_av);
        assert!(config.capabilities.xbox);
    }

    #[test]
    fn test_dlna_forces_extension_check() {
        let config = DlnaConfig {
            capabilities: Capabilities { upnp_av: true, dlna: true, xbox: false },
            check_extensions: false,
            ..DlnaConfig::default()
        }
        .normalized();
        assert!(config.check_extensions);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = "interface: eth0\nport: 49200\ncapabilities:\n  upnp_av: true\n  dlna: true\n";
        let config: DlnaConfig = serde_yaml::from_str(yaml).unwrap();
        let config = config.normalized();
        assert_eq!(config.interface, "eth0");
        assert_eq!(config.port, 49200);
        assert!(config.capabilities.dlna);
        assert!(config.check_extensions);
    }
}
