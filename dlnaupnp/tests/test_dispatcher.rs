//! Tests d'intégration : dispatcher et worker d'eventing contre un
//! adaptateur enregistreur.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use dlnastream::web::WebHandlerChain;
use dlnaupnp::{
    ActionEvent, ActionRequest, Device, DeviceHandle, EventingWorker, PropertySet, ServiceAction,
    ServiceDefinition, StateVariable, SubscriptionRequest, UpnpAdapter, UpnpDispatcher,
    UpnpError, UpnpService, VarType, soap_request,
};
use dlnaupnp::devices::DeviceMode;

/// Adaptateur qui enregistre les notifications GENA.
#[derive(Default)]
struct RecordingAdapter {
    notifications: Mutex<Vec<(String, PropertySet)>>,
    subscriptions: Mutex<Vec<(String, PropertySet)>>,
}

impl UpnpAdapter for RecordingAdapter {
    fn init(&self, _ip: &str, port: u16) -> Result<u16, UpnpError> {
        Ok(if port == 0 { 50000 } else { port })
    }

    fn enable_webserver(&self, _enable: bool) {}

    fn add_virtual_dir(&self, _prefix: &str) -> Result<(), UpnpError> {
        Ok(())
    }

    fn set_virtual_dir_handlers(&self, _handlers: Arc<WebHandlerChain>) {}

    fn register_root_device(&self, _description_xml: &str) -> Result<DeviceHandle, UpnpError> {
        Ok(1)
    }

    fn unregister_root_device(&self, _handle: DeviceHandle) -> Result<(), UpnpError> {
        Ok(())
    }

    fn send_advertisement(&self, _handle: DeviceHandle, _seconds: u32) -> Result<(), UpnpError> {
        Ok(())
    }

    fn notify_ext(
        &self,
        _handle: DeviceHandle,
        _udn: &str,
        service_id: &str,
        property_set: &PropertySet,
    ) -> Result<(), UpnpError> {
        self.notifications
            .lock()
            .push((service_id.to_string(), property_set.clone()));
        Ok(())
    }

    fn accept_subscription_ext(
        &self,
        _handle: DeviceHandle,
        _udn: &str,
        service_id: &str,
        property_set: &PropertySet,
        _sid: &str,
    ) -> Result<(), UpnpError> {
        self.subscriptions
            .lock()
            .push((service_id.to_string(), property_set.clone()));
        Ok(())
    }
}

/// Service d'essai : une action Echo, une variable évènementielle.
struct EchoService {
    definition: ServiceDefinition,
    state: Mutex<String>,
}

impl EchoService {
    fn new() -> Self {
        Self {
            definition: ServiceDefinition::new(
                "urn:upnp-org:serviceId:Echo",
                "urn:schemas-upnp-org:service:Echo:1",
                "echo.xml",
                "echo_control",
                "echo_event",
                vec![
                    ServiceAction::new("Echo")
                        .arg_in("Input", "A_ARG_TYPE_Input")
                        .arg_out("Output", "A_ARG_TYPE_Input"),
                    ServiceAction::new("Touch"),
                    ServiceAction::stub("NotImplemented"),
                ],
                vec![
                    StateVariable::new("Status", VarType::String).evented(),
                    StateVariable::new("A_ARG_TYPE_Input", VarType::String),
                ],
            ),
            state: Mutex::new("idle".to_string()),
        }
    }
}

impl UpnpService for EchoService {
    fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    fn invoke(&self, action: &str, ev: &mut ActionEvent<'_>) {
        match action {
            "Echo" => match ev.get_string("Input") {
                Some(input) => ev.add_response("Output", input),
                None => ev.set_error(402, "Invalid Args"),
            },
            "Touch" => {
                *self.state.lock() = "touched".to_string();
                if let Some(variable) = self.definition.find_variable("Status") {
                    variable.request_event();
                }
            }
            _ => ev.set_error(401, "Invalid Action"),
        }
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        match name {
            "Status" => Some(self.state.lock().clone()),
            _ => None,
        }
    }
}

fn test_device() -> Arc<Device> {
    let mut device = Device::new(
        "urn:schemas-upnp-org:device:MediaServer:1",
        None,
        DeviceMode::default(),
    );
    device.set_uuid("test-device");
    device.add_service(Arc::new(EchoService::new()));
    Arc::new(device)
}

fn action_request(device: &Device, action: &str, args: &[(&str, &str)]) -> ActionRequest {
    ActionRequest {
        dev_udn: device.udn(),
        service_id: "urn:upnp-org:serviceId:Echo".to_string(),
        action_name: action.to_string(),
        request: soap_request(action, args),
    }
}

#[test]
fn test_action_roundtrip() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter, 1);

    let outcome = dispatcher.on_action_request(&action_request(&device, "Echo", &[("Input", "ping")]));
    assert!(outcome.is_success());
    assert_eq!(outcome.responses, vec![("Output".to_string(), "ping".to_string())]);
}

#[test]
fn test_action_default_empty_response() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter, 1);

    let outcome = dispatcher.on_action_request(&action_request(&device, "Touch", &[]));
    assert!(outcome.is_success());
    assert!(outcome.responses.is_empty());
}

#[test]
fn test_unknown_action_gets_401() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter, 1);

    let outcome = dispatcher.on_action_request(&action_request(&device, "Bogus", &[]));
    assert_eq!(outcome.error.as_ref().unwrap().0, 401);

    // Action déclarée mais sans callback
    let outcome =
        dispatcher.on_action_request(&action_request(&device, "NotImplemented", &[]));
    assert_eq!(outcome.error.as_ref().unwrap().0, 401);
}

#[test]
fn test_wrong_udn_rejected() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device, adapter, 1);

    let request = ActionRequest {
        dev_udn: "uuid:someone-else".to_string(),
        service_id: "urn:upnp-org:serviceId:Echo".to_string(),
        action_name: "Echo".to_string(),
        request: soap_request("Echo", &[("Input", "x")]),
    };
    let outcome = dispatcher.on_action_request(&request);
    assert!(!outcome.is_success());
}

#[test]
fn test_subscription_delivers_initial_state() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter.clone(), 1);

    dispatcher.on_subscription_request(&SubscriptionRequest {
        udn: device.udn(),
        service_id: "urn:upnp-org:serviceId:Echo".to_string(),
        sid: "uuid:sub-1".to_string(),
    });

    let subscriptions = adapter.subscriptions.lock();
    assert_eq!(subscriptions.len(), 1);
    let (_, property_set) = &subscriptions[0];
    assert_eq!(property_set, &vec![("Status".to_string(), "idle".to_string())]);
}

#[test]
fn test_state_var_request() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter, 1);

    let value = dispatcher.on_state_var_request(&dlnaupnp::StateVarRequest {
        dev_udn: device.udn(),
        service_id: "urn:upnp-org:serviceId:Echo".to_string(),
        var_name: "Status".to_string(),
    });
    assert_eq!(value.as_deref(), Some("idle"));
}

#[test]
fn test_eventing_worker_notifies_changes() {
    let device = test_device();
    let adapter = Arc::new(RecordingAdapter::default());
    let dispatcher = UpnpDispatcher::new(device.clone(), adapter.clone(), 1);
    let worker = EventingWorker::start(device.clone(), adapter.clone(), 1);

    // Toucher l'état : le compteur d'eventing de Status avance
    dispatcher.on_action_request(&action_request(&device, "Touch", &[]));
    worker.signal();

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        {
            let notifications = adapter.notifications.lock();
            if !notifications.is_empty() {
                let (service_id, property_set) = &notifications[0];
                assert_eq!(service_id, "urn:upnp-org:serviceId:Echo");
                assert_eq!(
                    property_set,
                    &vec![("Status".to_string(), "touched".to_string())]
                );
                break;
            }
        }
        assert!(Instant::now() < deadline, "no notification within 2s");
        std::thread::sleep(Duration::from_millis(20));
    }

    // Sans nouveau changement, pas de notification supplémentaire
    std::thread::sleep(Duration::from_millis(450));
    assert_eq!(adapter.notifications.lock().len(), 1);

    worker.stop();
}
