//! Génération du document SCPD depuis les tables d'un service.

use dlnautils::xml::{append_text_child, element_to_string};
use xmltree::{Element, XMLNode};

use super::{Direction, ServiceDefinition};

/// Émet le squelette SCPD : `specVersion` 1.0, `actionList` (actions
/// implémentées seulement, chaque argument relié à sa variable) puis
/// `serviceStateTable` (type déclaré, `sendEvents`, valeurs autorisées).
pub fn scpd_xml(definition: &ServiceDefinition) -> String {
    let mut scpd = Element::new("scpd");
    scpd.attributes.insert(
        "xmlns".to_string(),
        "urn:schemas-upnp-org:service-1-0".to_string(),
    );

    let mut spec_version = Element::new("specVersion");
    append_text_child(&mut spec_version, "major", "1");
    append_text_child(&mut spec_version, "minor", "0");
    scpd.children.push(XMLNode::Element(spec_version));

    let mut action_list = Element::new("actionList");
    for action in &definition.actions {
        if !action.implemented {
            continue;
        }
        let mut action_elem = Element::new("action");
        append_text_child(&mut action_elem, "name", action.name);
        let mut argument_list = Element::new("argumentList");
        for argument in &action.arguments {
            let mut argument_elem = Element::new("argument");
            append_text_child(&mut argument_elem, "name", argument.name);
            append_text_child(
                &mut argument_elem,
                "direction",
                match argument.direction {
                    Direction::In => "in",
                    Direction::Out => "out",
                },
            );
            append_text_child(&mut argument_elem, "relatedStateVariable", argument.related);
            argument_list.children.push(XMLNode::Element(argument_elem));
        }
        action_elem.children.push(XMLNode::Element(argument_list));
        action_list.children.push(XMLNode::Element(action_elem));
    }
    scpd.children.push(XMLNode::Element(action_list));

    let mut state_table = Element::new("serviceStateTable");
    for variable in &definition.variables {
        let mut variable_elem = Element::new("stateVariable");
        variable_elem.attributes.insert(
            "sendEvents".to_string(),
            if variable.evented { "yes" } else { "no" }.to_string(),
        );
        append_text_child(&mut variable_elem, "name", variable.name);
        append_text_child(&mut variable_elem, "dataType", variable.var_type.scpd_name());
        if !variable.allowed.is_empty() {
            let mut allowed_list = Element::new("allowedValueList");
            for value in variable.allowed {
                append_text_child(&mut allowed_list, "allowedValue", value);
            }
            variable_elem.children.push(XMLNode::Element(allowed_list));
        }
        state_table.children.push(XMLNode::Element(variable_elem));
    }
    scpd.children.push(XMLNode::Element(state_table));

    element_to_string(&scpd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ServiceAction, StateVariable, VarType};

    fn definition() -> ServiceDefinition {
        ServiceDefinition::new(
            "urn:upnp-org:serviceId:Dummy",
            "urn:schemas-upnp-org:service:Dummy:1",
            "dummy.xml",
            "dummy_control",
            "dummy_event",
            vec![
                ServiceAction::new("Play")
                    .arg_in("InstanceID", "A_ARG_TYPE_InstanceID")
                    .arg_in("Speed", "TransportPlaySpeed"),
                ServiceAction::stub("Record"),
            ],
            vec![
                StateVariable::new("TransportState", VarType::String)
                    .evented()
                    .allowed(&["STOPPED", "PLAYING"]),
                StateVariable::new("A_ARG_TYPE_InstanceID", VarType::Ui4),
            ],
        )
    }

    #[test]
    fn test_scpd_structure() {
        let xml = definition().scpd_xml();
        assert!(xml.contains("urn:schemas-upnp-org:service-1-0"));
        assert!(xml.contains("<major>1</major>"));
        assert!(xml.contains("<name>Play</name>"));
        assert!(xml.contains("<relatedStateVariable>A_ARG_TYPE_InstanceID</relatedStateVariable>"));
        assert!(xml.contains("<direction>in</direction>"));
    }

    #[test]
    fn test_scpd_skips_unimplemented_actions() {
        let xml = definition().scpd_xml();
        assert!(!xml.contains("<name>Record</name>"));
    }

    #[test]
    fn test_scpd_state_variables() {
        let xml = definition().scpd_xml();
        assert!(xml.contains("sendEvents=\"yes\""));
        assert!(xml.contains("sendEvents=\"no\""));
        assert!(xml.contains("<dataType>ui4</dataType>"));
        assert!(xml.contains("<allowedValue>STOPPED</allowedValue>"));
    }
}
