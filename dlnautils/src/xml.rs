//! Aide à la construction et à l'émission de documents XML.
//!
//! Les documents UPnP (SCPD, descripteur de device, property sets GENA)
//! sont construits avec `xmltree` puis sérialisés en chaîne. Ce module
//! centralise la conversion élément → chaîne et le trait [`ToXmlElement`]
//! implémenté par les objets qui savent se décrire en XML.

use xmltree::{Element, EmitterConfig, XMLNode};

/// Trait pour tout objet convertible en élément XML.
///
/// # Examples
///
/// ```ignore
/// let elem = service.to_xml_element();
/// let xml = element_to_string(&elem);
/// ```
pub trait ToXmlElement {
    fn to_xml_element(&self) -> Element;
}

/// Crée un élément ne contenant qu'un nœud texte.
pub fn text_element(name: &str, value: &str) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(value.to_string()));
    elem
}

/// Ajoute un élément texte enfant à `parent`.
pub fn append_text_child(parent: &mut Element, name: &str, value: &str) {
    parent.children.push(XMLNode::Element(text_element(name, value)));
}

/// Sérialise un élément en chaîne XML indentée.
pub fn element_to_string(elem: &Element) -> String {
    let config = EmitterConfig::new().perform_indent(true).indent_string("  ");

    let mut buf = Vec::new();
    elem.write_with_config(&mut buf, config)
        .expect("Failed to write XML");

    String::from_utf8(buf).expect("Invalid UTF-8")
}

/// Sérialise un élément en chaîne XML compacte, sans déclaration `<?xml?>`.
///
/// Utilisé pour les valeurs imbriquées dans des réponses SOAP (DIDL,
/// LastChange) où la déclaration de document serait invalide.
pub fn element_to_inner_string(elem: &Element) -> String {
    let config = EmitterConfig::new().write_document_declaration(false);

    let mut buf = Vec::new();
    elem.write_with_config(&mut buf, config)
        .expect("Failed to write XML");

    String::from_utf8(buf).expect("Invalid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element() {
        let elem = text_element("dc:title", "Abbey Road");
        assert_eq!(elem.name, "dc:title");
        assert_eq!(elem.get_text().unwrap(), "Abbey Road");
    }

    #[test]
    fn test_element_to_string_escapes_text() {
        // Les données de caractères doivent rester du XML valide
        let elem = text_element("dc:title", "Tom & Jerry <live>");
        let xml = element_to_string(&elem);
        assert!(xml.contains("Tom &amp; Jerry &lt;live>") || xml.contains("Tom &amp; Jerry &lt;live&gt;"));
        assert!(!xml.contains("& Jerry"));
    }

    #[test]
    fn test_element_to_inner_string_has_no_declaration() {
        let elem = text_element("Event", "x");
        let xml = element_to_inner_string(&elem);
        assert!(!xml.contains("<?xml"));
    }
}
