//! Scripted transport for unit tests
//!
//! Serves canned GET bodies per route, records every PUT and answers PUTs
//! the way FwESI does unless told otherwise. Clones share state, so a test
//! can hand one clone to [`EsiRemote`](crate::EsiRemote) and inspect the other.

use async_trait::async_trait;
use esi_core_interface::{routes, RemoteTransport, Result, TransportError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Value>,
    put_answers: HashMap<String, Value>,
    puts: Vec<(String, Value)>,
    gets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A server with two saves (one carrying a sub save), an active scenario
    /// and two actors
    pub fn fwesi() -> Self {
        let mock = Self::new();
        mock.set_response(
            routes::SAVE_FILES,
            json!([
                {
                    "scenarioId": 1,
                    "scenarioName": "Verkehrsunfall",
                    "categoryName": "THL",
                    "absolutePath": "C:/FwESI/saves/vu.sav",
                    "subSaves": [{
                        "scenarioId": 11,
                        "scenarioName": "Verkehrsunfall Nacht",
                        "categoryName": "THL",
                        "absolutePath": "C:/FwESI/saves/vu_nacht.sav",
                        "subSaves": []
                    }]
                },
                {
                    "scenarioId": 2,
                    "scenarioName": "Zimmerbrand",
                    "categoryName": "Brand",
                    "absolutePath": "C:/FwESI/saves/zimmerbrand.sav",
                    "subSaves": []
                }
            ]),
        );
        mock.set_response(
            routes::ACTIVE_SAVE,
            json!({"scenarioId": 1, "scenarioName": "Verkehrsunfall"}),
        );
        mock.set_response(routes::OPERATOR_ACTORS, actors_fixture());
        mock
    }

    /// Body served for `GET path`
    pub fn set_response(&self, path: &str, body: Value) {
        self.state.lock().unwrap().responses.insert(path.to_string(), body);
    }

    /// Answer for `PUT path`, replacing the FwESI default
    pub fn set_put_answer(&self, path: &str, answer: Value) {
        self.state.lock().unwrap().put_answers.insert(path.to_string(), answer);
    }

    /// Every PUT so far, in order
    pub fn puts(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().puts.clone()
    }

    /// Bodies of the PUTs sent to `path`
    pub fn puts_to(&self, path: &str) -> Vec<Value> {
        self.puts()
            .into_iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body)
            .collect()
    }

    /// How often `path` was fetched
    pub fn get_count(&self, path: &str) -> usize {
        self.state.lock().unwrap().gets.iter().filter(|p| *p == path).count()
    }
}

fn actors_fixture() -> Value {
    json!({
        "operatorActors": [
            {
                "name": "HLF 20",
                "id": 1,
                "isVisible": true,
                "type": "emergency_vehicle",
                "properties": [
                    {
                        "displayName": "Blaulicht",
                        "name": "DP_BlueLight",
                        "type": "bool",
                        "value": "false",
                        "minValue": 0,
                        "maxValue": 1,
                        "stepSize": 1
                    },
                    {
                        "displayName": "Pumpendruck",
                        "name": "DP_PumpPressure",
                        "type": "float",
                        "value": "0.0",
                        "minValue": 0,
                        "maxValue": 16,
                        "stepSize": 1
                    }
                ],
                "propertyArrays": [],
                "propertyEnums": [{
                    "name": "DoorState",
                    "type": "EDoorState",
                    "displayName": "Türen",
                    "allValues": [
                        {"enumFieldId": 0, "enumFieldValue": "OPEN"},
                        {"enumFieldId": 1, "enumFieldValue": "CLOSED"}
                    ],
                    "currentValue": {"enumFieldId": 1, "enumFieldValue": "CLOSED"}
                }],
                "actions": [
                    {"name": "Horn", "displayName": "Horn", "buttonName": "Hupen"}
                ]
            },
            {
                "name": "Fire Kitchen",
                "id": 2,
                "isVisible": false,
                "type": "fire",
                "properties": [{
                    "displayName": "Intensität",
                    "name": "DP_Intensity",
                    "type": "int",
                    "value": "3",
                    "minValue": 0,
                    "maxValue": 10,
                    "stepSize": 1
                }],
                "propertyArrays": [],
                "propertyEnums": [],
                "actions": []
            }
        ]
    })
}

#[async_trait]
impl RemoteTransport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.gets.push(path.to_string());
        state.responses.get(path).cloned().ok_or(TransportError::Status {
            path: path.to_string(),
            status: 404,
        })
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.puts.push((path.to_string(), body.clone()));

        if let Some(answer) = state.put_answers.get(path) {
            return Ok(answer.clone());
        }
        match path {
            routes::SAVE_FILES => Ok(json!({ "answer": routes::SAVE_LOADED_ANSWER })),
            routes::OPERATOR_ACTORS => Ok(json!({ "answer": routes::ACTOR_UPDATED_ANSWER })),
            _ => Err(TransportError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }

    fn endpoint(&self) -> String {
        "mock://fwesi".to_string()
    }
}
