#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use http::Method;
use serde_json::{json, Value};
use vmanage_client::{
    ApiResponse, Gateway, RawResponse, RequestOptions, ResponseNormalizer, TemplateSet,
    VManageClient, VManageResult,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/dataservice/j_security_check";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Mounts a login endpoint that accepts any credentials.
pub async fn setup_login(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "JSESSIONID=test; path=/"))
        .mount(mock_server)
        .await;
}

/// Builds a logged-in client against a mock server.
pub async fn setup_test_client(mock_server: &MockServer) -> VManageClient {
    init_logging();
    setup_login(mock_server).await;

    VManageClient::builder()
        .controller_url(mock_server.uri())
        .username("test-user")
        .password("test-password")
        .build()
        .await
        .expect("Failed to build VManageClient")
}

/// An exported template set with one device template, `branch`, whose
/// references use the exported IDs "1", "2" and "3". Feature "3" sits two
/// levels deep under "1".
pub fn branch_template_set() -> TemplateSet {
    let mut set = TemplateSet::new();
    set.insert(
        "device_template",
        json!({
            "templates": [{
                "templateId": "dt-old",
                "templateName": "branch",
                "templateDescription": "Branch router",
                "deviceType": "vedge-cloud",
                "configType": "template",
                "factoryDefault": false,
                "policyId": "p-old",
                "lastUpdatedBy": "admin",
                "featureTemplateUidRange": [{"templateId": "2", "templateType": "cisco_vpn"}],
                "generalTemplates": [
                    {
                        "templateId": "1",
                        "templateType": "cisco_vpn",
                        "subTemplates": [{
                            "templateId": "2",
                            "templateType": "cisco_vpn_interface",
                            "subTemplates": [{"templateId": "3", "templateType": "cisco_logging"}]
                        }]
                    },
                    {"templateId": "3", "templateType": "cisco_logging"}
                ]
            }]
        }),
    );
    set.insert(
        "branch_features",
        json!({
            "1": feature("vpn0", "cisco_vpn"),
            "2": feature("vpn0-ge0", "cisco_vpn_interface"),
            "3": feature("logging", "cisco_logging"),
        }),
    );
    set.insert(
        "branch_policy",
        json!({
            "p-old": {
                "policyName": "branch-policy",
                "policyDescription": "Branch policy",
                "policyDefinition": {"assembly": []},
                "policyId": "p-old",
                "lastUpdatedBy": "admin"
            }
        }),
    );
    set
}

pub fn feature(name: &str, template_type: &str) -> Value {
    json!({
        "templateName": name,
        "templateDescription": format!("{name} feature"),
        "templateType": template_type,
        "templateMinVersion": "15.0.0",
        "deviceType": ["vedge-cloud"],
        "factoryDefault": false,
        "templateDefinition": {"name": name},
        "templateId": "exported",
        "createdBy": "admin",
        "lastUpdatedOn": 1500000000
    })
}

#[derive(Debug, Default)]
struct ControllerState {
    next_id: u64,
    feature_templates: Vec<(String, String)>,
    device_templates: Vec<(String, Value)>,
    policies: Vec<(String, String)>,
    calls: Vec<(Method, String, Option<Value>)>,
    failing_writes: Vec<String>,
}

/// In-memory controller holding feature templates, device templates and
/// vEdge policies. Answers go through the real normalizer.
#[derive(Debug)]
pub struct FakeController {
    state: Mutex<ControllerState>,
}

impl FakeController {
    /// New objects get sequential numeric IDs starting at `first_id`.
    pub fn starting_at(first_id: u64) -> Self {
        init_logging();
        Self {
            state: Mutex::new(ControllerState {
                next_id: first_id,
                ..Default::default()
            }),
        }
    }

    pub fn with_feature(self, id: &str, name: &str) -> Self {
        self.lock().feature_templates.push((id.into(), name.into()));
        self
    }

    pub fn with_policy(self, id: &str, name: &str) -> Self {
        self.lock().policies.push((id.into(), name.into()));
        self
    }

    /// Makes every write to `path` answer 400.
    pub fn failing_writes_to(self, path: &str) -> Self {
        self.lock().failing_writes.push(path.into());
        self
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.lock()
            .feature_templates
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub fn feature_id(&self, name: &str) -> Option<String> {
        self.lock()
            .feature_templates
            .iter()
            .find(|(_, n)| n == name)
            .map(|(id, _)| id.clone())
    }

    pub fn policy_names(&self) -> Vec<String> {
        self.lock()
            .policies
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Bodies of the created device templates, in creation order.
    pub fn device_templates(&self) -> Vec<Value> {
        self.lock()
            .device_templates
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn writes(&self) -> Vec<(Method, String, Option<Value>)> {
        self.lock()
            .calls
            .iter()
            .filter(|(m, _, _)| *m != Method::GET)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        self.state.lock().expect("controller state poisoned")
    }

    fn route(&self, method: &Method, path: &str, body: Option<Value>) -> (u16, String) {
        let mut state = self.lock();

        if *method != Method::GET && state.failing_writes.iter().any(|p| p == path) {
            let body = json!({
                "error": {"details": format!("Rejected write to {path}"), "message": "Bad Request"}
            });
            return (400, body.to_string());
        }

        let body = body.unwrap_or(Value::Null);
        match (method.as_str(), path) {
            ("GET", "/template/feature") => {
                let data: Vec<Value> = state
                    .feature_templates
                    .iter()
                    .map(|(id, name)| json!({"templateId": id, "templateName": name}))
                    .collect();
                (200, json!({ "data": data }).to_string())
            }
            ("POST", "/template/feature") => {
                let id = state.next_id.to_string();
                state.next_id += 1;
                let name = body["templateName"].as_str().unwrap_or_default().to_string();
                state.feature_templates.push((id.clone(), name));
                (200, json!({ "templateId": id }).to_string())
            }
            ("GET", "/template/device/") => {
                let data: Vec<Value> = state
                    .device_templates
                    .iter()
                    .map(|(id, body)| json!({"templateId": id, "templateName": body["templateName"]}))
                    .collect();
                (200, json!({ "data": data }).to_string())
            }
            ("POST", "/template/device/feature/") => {
                let id = state.next_id.to_string();
                state.next_id += 1;
                state.device_templates.push((id.clone(), body));
                (200, json!({ "templateId": id }).to_string())
            }
            ("GET", "/template/policy/vedge/") => {
                let data: Vec<Value> = state
                    .policies
                    .iter()
                    .map(|(id, name)| json!({"policyId": id, "policyName": name}))
                    .collect();
                (200, json!({ "data": data }).to_string())
            }
            ("POST", "/template/policy/vedge/") => {
                let id = format!("policy-{}", state.next_id);
                state.next_id += 1;
                let name = body["policyName"].as_str().unwrap_or_default().to_string();
                state.policies.push((id, name));
                (200, String::new())
            }
            _ => (404, json!({"error": {"message": "Not found"}}).to_string()),
        }
    }
}

#[async_trait]
impl Gateway for FakeController {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        _options: RequestOptions,
    ) -> VManageResult<ApiResponse> {
        self.lock()
            .calls
            .push((method.clone(), path.to_string(), body.clone()));

        let (status, response_body) = self.route(&method, path, body);
        ResponseNormalizer::new().normalize(RawResponse::new(method, status, response_body))
    }
}
