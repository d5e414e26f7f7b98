//! # dlnamediaserver - Digital Media Server (DMS)
//!
//! Les trois services du serveur de médias :
//!
//! - **ContentDirectory** : façade SOAP du VFS (Browse, Search,
//!   GetSystemUpdateID, GetFeatureList, …) ;
//! - **ConnectionManager** : publication des `protocolInfo` sources ;
//! - **MediaReceiverRegistrar** : fausses autorisations pour la Xbox 360 ;
//!
//! et l'assemblage du device `urn:schemas-upnp-org:device:MediaServer:1`.

pub mod connectionmanager;
pub mod contentdirectory;
mod device;
pub mod msregistrar;

pub use connectionmanager::CmsService;
pub use contentdirectory::CdsService;
pub use device::new_dms;
pub use msregistrar::MsrService;
