//! Utilitaires pour la gestion des interfaces réseau.
//!
//! Le serveur UPnP se lie à une interface nommée dans la configuration
//! (`lo` par défaut). Ces fonctions vérifient qu'elle existe et en
//! extraient l'adresse IPv4 à passer à l'adaptateur UPnP.

use get_if_addrs::{IfAddr, get_if_addrs};
use std::net::UdpSocket;

/// Vérifie qu'une interface réseau du nom donné est présente et active.
pub fn interface_exists(name: &str) -> bool {
    match get_if_addrs() {
        Ok(interfaces) => interfaces.iter().any(|itf| itf.name == name),
        Err(_) => false,
    }
}

/// Retourne l'adresse IPv4 d'une interface réseau, si elle existe.
///
/// # Examples
///
/// ```
/// use dlnautils::interface_address;
///
/// // L'interface loopback est toujours présente
/// assert_eq!(interface_address("lo").as_deref(), Some("127.0.0.1"));
/// ```
pub fn interface_address(name: &str) -> Option<String> {
    let interfaces = get_if_addrs().ok()?;
    interfaces.into_iter().find_map(|itf| {
        if itf.name != name {
            return None;
        }
        match itf.addr {
            IfAddr::V4(addr) => Some(addr.ip.to_string()),
            IfAddr::V6(_) => None,
        }
    })
}

/// Devine l'adresse IP locale de la machine.
///
/// Demande au système quelle interface serait utilisée pour joindre une
/// adresse publique (aucun trafic n'est émis, UDP est sans connexion).
/// Retourne `127.0.0.1` en cas d'échec.
pub fn guess_local_ip() -> String {
    match UdpSocket::bind("0.0.0.0:0") {
        Ok(socket) => {
            if socket.connect("8.8.8.8:80").is_ok() {
                if let Ok(local_addr) = socket.local_addr() {
                    return local_addr.ip().to_string();
                }
            }
            "127.0.0.1".to_string()
        }
        Err(_) => "127.0.0.1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_exists() {
        assert!(interface_exists("lo"));
    }

    #[test]
    fn test_unknown_interface() {
        assert!(!interface_exists("no-such-itf0"));
        assert!(interface_address("no-such-itf0").is_none());
    }

    #[test]
    fn test_loopback_address() {
        assert_eq!(interface_address("lo").as_deref(), Some("127.0.0.1"));
    }
}
