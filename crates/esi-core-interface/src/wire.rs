//! JSON bodies exchanged with the FwESI remote-control server
//!
//! Field names follow the server's camelCase spelling. Lists that FwESI
//! sometimes leaves out default to empty so a sparse actor still decodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// One entry of `GET save-files`. Sub saves nest the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileDto {
    pub scenario_id: i64,
    pub scenario_name: String,
    pub category_name: String,
    pub absolute_path: String,
    #[serde(default)]
    pub sub_saves: Vec<SaveFileDto>,
}

/// Body of `GET save-files/active`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSaveDto {
    pub scenario_id: i64,
    pub scenario_name: String,
}

/// Body of `GET operatoractors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorActorListDto {
    #[serde(default)]
    pub operator_actors: Vec<OperatorActorDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorActorDto {
    pub name: String,
    pub id: i64,
    pub is_visible: bool,
    #[serde(rename = "type")]
    pub actor_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyDto>,
    /// Shape is not documented by FwESI, kept as raw objects
    #[serde(default)]
    pub property_arrays: Vec<Map<String, Value>>,
    #[serde(default)]
    pub property_enums: Vec<PropertyEnumDto>,
    #[serde(default)]
    pub actions: Vec<ActionDto>,
}

/// A scalar parameter on an actor. `value` is always transmitted as text and
/// interpreted according to `type` (`bool`, `string`, `int` or `float`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
    #[serde(default)]
    pub min_value: i64,
    #[serde(default)]
    pub max_value: i64,
    #[serde(default)]
    pub step_size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumFieldDto {
    pub enum_field_id: i64,
    pub enum_field_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEnumDto {
    pub name: String,
    #[serde(rename = "type")]
    pub enum_type: String,
    pub display_name: String,
    #[serde(default)]
    pub all_values: Vec<EnumFieldDto>,
    pub current_value: EnumFieldDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDto {
    pub name: String,
    pub display_name: String,
    pub button_name: String,
}

/// Server reply to a PUT, e.g. `{"answer": "actor has been updated"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerAnswer {
    pub answer: String,
}

impl ServerAnswer {
    /// Decode a PUT reply. Anything not shaped like `{"answer": "..."}` is `None`.
    pub fn from_reply(reply: &Value) -> Option<Self> {
        match Self::deserialize(reply) {
            Ok(answer) => Some(answer),
            Err(e) => {
                trace!("Reply {} is not a server answer: {}", reply, e);
                None
            }
        }
    }

    pub fn is(&self, expected: &str) -> bool {
        self.answer == expected
    }
}

/// Body of `PUT save-files`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLoadRequest {
    pub absolute_path: String,
}

/// Body of `PUT operatoractors`. Only the changed parts are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorUpdate {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyUpdate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_enums: Vec<PropertyEnumUpdate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionTrigger>,
}

impl ActorUpdate {
    /// True when the update carries nothing besides the actor id
    pub fn is_empty(&self) -> bool {
        self.is_visible.is_none()
            && self.properties.is_empty()
            && self.property_enums.is_empty()
            && self.actions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEnumUpdate {
    pub name: String,
    pub current_value: EnumFieldDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTrigger {
    pub name: String,
}
