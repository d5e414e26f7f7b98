use thiserror::Error;

/// Erreurs de configuration : jamais réessayées, remontées à l'appelant.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// L'interface réseau demandée n'existe pas ou est inactive.
    #[error("unknown or down network interface: {0}")]
    UnknownInterface(String),

    /// Aucun device n'a été attaché au contrôleur.
    #[error("no device configured")]
    NoDevice,

    /// Fichier de configuration illisible.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Fichier de configuration invalide.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Erreurs du cycle de vie du contrôleur.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upnp(#[from] dlnaupnp::UpnpError),
}
