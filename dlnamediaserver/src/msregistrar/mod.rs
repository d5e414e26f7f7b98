//! # X_MS_MediaReceiverRegistrar:1
//!
//! Extension Microsoft requise par la Xbox 360 : trois actions à réponse
//! constante qui accordent une fausse autorisation. Aucun état.

use dlnaupnp::{
    ActionEvent, ServiceAction, ServiceDefinition, StateVariable, UpnpService, VarType,
};

pub const MSR_SERVICE_ID: &str = "urn:microsoft.com:serviceId:X_MS_MediaReceiverRegistrar";
pub const MSR_SERVICE_TYPE: &str = "urn:microsoft.com:service:X_MS_MediaReceiverRegistrar:1";

/// Service Media Receiver Registrar.
pub struct MsrService {
    definition: ServiceDefinition,
}

impl Default for MsrService {
    fn default() -> Self {
        Self::new()
    }
}

impl MsrService {
    pub fn new() -> Self {
        Self {
            definition: ServiceDefinition::new(
                MSR_SERVICE_ID,
                MSR_SERVICE_TYPE,
                "msr.xml",
                "msr_control",
                "msr_event",
                vec![
                    ServiceAction::new("IsAuthorized")
                        .arg_in("DeviceID", "A_ARG_TYPE_DeviceID")
                        .arg_out("Result", "A_ARG_TYPE_Result"),
                    ServiceAction::new("RegisterDevice")
                        .arg_in("RegistrationReqMsg", "A_ARG_TYPE_RegistrationReqMsg")
                        .arg_out("RegistrationRespMsg", "A_ARG_TYPE_RegistrationRespMsg"),
                    ServiceAction::new("IsValidated")
                        .arg_in("DeviceID", "A_ARG_TYPE_DeviceID")
                        .arg_out("Result", "A_ARG_TYPE_Result"),
                ],
                vec![
                    StateVariable::new("A_ARG_TYPE_DeviceID", VarType::String),
                    StateVariable::new("A_ARG_TYPE_Result", VarType::I4),
                    StateVariable::new("A_ARG_TYPE_RegistrationReqMsg", VarType::String),
                    StateVariable::new("A_ARG_TYPE_RegistrationRespMsg", VarType::String),
                    StateVariable::new("AuthorizationGrantedUpdateID", VarType::Ui4),
                    StateVariable::new("AuthorizationDeniedUpdateID", VarType::Ui4),
                    StateVariable::new("ValidationSucceededUpdateID", VarType::Ui4),
                    StateVariable::new("ValidationRevokedUpdateID", VarType::Ui4),
                ],
            ),
        }
    }
}

impl UpnpService for MsrService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            // fausse autorisation pour les lecteurs Microsoft
            "IsAuthorized" | "IsValidated" => ev.add_response("Result", "1"),
            "RegisterDevice" => {}
            _ => ev.set_error(401, "Invalid Action"),
        }
    }

    fn get_variable(&self, _name: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlnaupnp::soap_request;

    #[test]
    fn test_constant_answers() {
        let service = MsrService::new();

        let request = soap_request("IsAuthorized", &[("DeviceID", "whatever")]);
        let mut ev = ActionEvent::new(&request);
        service.invoke("IsAuthorized", &mut ev);
        assert_eq!(ev.responses(), &[("Result".to_string(), "1".to_string())]);

        let request = soap_request("RegisterDevice", &[]);
        let mut ev = ActionEvent::new(&request);
        service.invoke("RegisterDevice", &mut ev);
        assert!(ev.responses().is_empty());
        assert!(ev.error().is_none());

        let request = soap_request("IsValidated", &[]);
        let mut ev = ActionEvent::new(&request);
        service.invoke("IsValidated", &mut ev);
        assert_eq!(ev.responses(), &[("Result".to_string(), "1".to_string())]);
    }
}
