//! Évènement d'action : le contexte passé aux callbacks des services.
//!
//! Porte l'arbre DOM de la requête SOAP (lecture des arguments via
//! [`get_string`](ActionEvent::get_string) /
//! [`get_ui4`](ActionEvent::get_ui4)), collecte les arguments de réponse
//! et, en cas d'échec, le code d'erreur SOAP et son libellé.

use xmltree::{Element, XMLNode};

/// Contexte d'exécution d'une action UPnP.
pub struct ActionEvent<'a> {
    request: &'a Element,
    responses: Vec<(String, String)>,
    error: Option<(u32, String)>,
}

impl<'a> ActionEvent<'a> {
    pub fn new(request: &'a Element) -> Self {
        Self { request, responses: Vec::new(), error: None }
    }

    /// Valeur texte d'un argument de la requête, `None` s'il est absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.request
            .get_child(key)
            .map(|child| child.get_text().map(|text| text.into_owned()).unwrap_or_default())
    }

    /// Valeur entière d'un argument. `ObjectID` retombe sur
    /// `ContainerID` (les requêtes Search nomment le container ainsi).
    /// Absent ou illisible vaut 0.
    pub fn get_ui4(&self, key: &str) -> u32 {
        let value = match self.get_string(key) {
            Some(value) => Some(value),
            None if key == "ObjectID" => self.get_string("ContainerID"),
            None => None,
        };
        value
            .and_then(|text| text.trim().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// Ajoute un argument de sortie à la réponse.
    pub fn add_response(&mut self, name: &str, value: impl Into<String>) {
        self.responses.push((name.to_string(), value.into()));
    }

    /// Pose le code d'erreur SOAP ; le corps de réponse sera omis.
    pub fn set_error(&mut self, code: u32, message: &str) {
        self.error = Some((code, message.to_string()));
    }

    pub fn error(&self) -> Option<&(u32, String)> {
        self.error.as_ref()
    }

    pub fn responses(&self) -> &[(String, String)] {
        &self.responses
    }

    pub fn into_parts(self) -> (Vec<(String, String)>, Option<(u32, String)>) {
        (self.responses, self.error)
    }
}

/// Construit l'élément DOM d'une requête SOAP d'action. Utilisé par les
/// tests et les adaptateurs de démonstration.
pub fn soap_request(action: &str, args: &[(&str, &str)]) -> Element {
    let mut request = Element::new(action);
    for (name, value) in args {
        let mut arg = Element::new(name);
        arg.children.push(XMLNode::Text(value.to_string()));
        request.children.push(XMLNode::Element(arg));
    }
    request
}
