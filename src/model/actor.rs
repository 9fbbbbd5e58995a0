//! OperatorActors: the remote-controllable objects of a FwESI scenario

use esi_core_interface::wire::{ActorUpdate, OperatorActorDto};
use serde_json::{Map, Value};

use super::action::Action;
use super::filter::{Attributes, FilterList};
use super::property::Property;
use super::property_enum::PropertyEnum;
use super::value::AttrValue;
use crate::error::{EsiError, Result};

/// A property array as FwESI reports it.
///
/// FwESI does not document the shape of these, so they are kept as raw JSON
/// and are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyArray {
    fields: Map<String, Value>,
}

impl PropertyArray {
    /// Raw JSON object
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// `is_visible` -> `isVisible`
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl Attributes for PropertyArray {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        let value = self
            .fields
            .get(name)
            .or_else(|| self.fields.get(&camel_case(name)))?;
        match value {
            Value::Bool(b) => Some(AttrValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(AttrValue::Int)
                .or_else(|| n.as_f64().map(AttrValue::Float)),
            Value::String(s) => Some(AttrValue::Text(s.clone())),
            _ => None,
        }
    }
}

/// A remote-controllable object (vehicle, door, fire, ...).
///
/// Setters only change the local copy and mark what changed;
/// [`EsiRemote`](crate::EsiRemote) decides when the change is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorActor {
    name: String,
    id: i64,
    is_visible: bool,
    actor_type: String,
    properties: Vec<Property>,
    property_arrays: Vec<PropertyArray>,
    property_enums: Vec<PropertyEnum>,
    actions: Vec<Action>,
    visibility_pending: bool,
}

impl OperatorActor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Actor type as reported by FwESI, e.g. `emergency_vehicle`
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    pub fn properties(&self) -> FilterList<'_, Property> {
        FilterList::new(&self.properties)
    }

    pub fn property_arrays(&self) -> FilterList<'_, PropertyArray> {
        FilterList::new(&self.property_arrays)
    }

    pub fn property_enums(&self) -> FilterList<'_, PropertyEnum> {
        FilterList::new(&self.property_enums)
    }

    pub fn actions(&self) -> FilterList<'_, Action> {
        FilterList::new(&self.actions)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
        self.visibility_pending = true;
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Result<&mut Property> {
        let id = self.id;
        self.properties
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| EsiError::MemberNotFound {
                actor_id: id,
                kind: "property",
                name: name.to_string(),
            })
    }

    pub fn property_enum(&self, name: &str) -> Option<&PropertyEnum> {
        self.property_enums.iter().find(|e| e.name() == name)
    }

    pub fn property_enum_mut(&mut self, name: &str) -> Result<&mut PropertyEnum> {
        let id = self.id;
        self.property_enums
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| EsiError::MemberNotFound {
                actor_id: id,
                kind: "enum",
                name: name.to_string(),
            })
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name() == name)
    }

    pub fn action_mut(&mut self, name: &str) -> Result<&mut Action> {
        let id = self.id;
        self.actions
            .iter_mut()
            .find(|a| a.name() == name)
            .ok_or_else(|| EsiError::MemberNotFound {
                actor_id: id,
                kind: "action",
                name: name.to_string(),
            })
    }

    /// Write a field by name: `is_visible` or the name of one of the properties.
    /// Everything else on an actor is read-only.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        let value = value.into();
        if name == "is_visible" {
            let visible = match value {
                AttrValue::Bool(b) => b,
                AttrValue::Int(i) => i != 0,
                AttrValue::Text(ref t) => serde_json::from_str::<bool>(t.trim())
                    .map_err(|_| EsiError::InvalidValue(format!("'{}' is not a bool", t)))?,
                AttrValue::Float(f) => f != 0.0,
            };
            self.set_visible(visible);
            return Ok(());
        }

        if self.property(name).is_some() {
            return self.property_mut(name)?.set_value(value);
        }

        if self.attribute(name).is_some() {
            return Err(EsiError::Unsupported(format!(
                "attribute '{}' of OperatorActor {} is read-only",
                name, self.id
            )));
        }

        Err(EsiError::MemberNotFound {
            actor_id: self.id,
            kind: "attribute",
            name: name.to_string(),
        })
    }

    /// Whether anything on this actor waits to be committed
    pub fn has_pending(&self) -> bool {
        self.visibility_pending
            || self.properties.iter().any(Property::is_pending)
            || self.property_enums.iter().any(PropertyEnum::is_pending)
            || self.actions.iter().any(Action::is_pending)
    }

    /// Collect every pending change into one update, or `None` if nothing changed
    pub fn pending_update(&self) -> Option<ActorUpdate> {
        let update = ActorUpdate {
            id: self.id,
            is_visible: self.visibility_pending.then_some(self.is_visible),
            properties: self.properties.iter().filter_map(Property::pending_update).collect(),
            property_enums: self
                .property_enums
                .iter()
                .filter_map(PropertyEnum::pending_update)
                .collect(),
            actions: self.actions.iter().filter_map(Action::pending_update).collect(),
        };
        (!update.is_empty()).then_some(update)
    }

    /// Forget every pending change (local values are kept)
    pub fn clear_pending(&mut self) {
        self.visibility_pending = false;
        self.properties.iter_mut().for_each(Property::clear_pending);
        self.property_enums.iter_mut().for_each(PropertyEnum::clear_pending);
        self.actions.iter_mut().for_each(Action::clear_pending);
    }
}

impl TryFrom<OperatorActorDto> for OperatorActor {
    type Error = EsiError;

    fn try_from(dto: OperatorActorDto) -> Result<Self> {
        let properties = dto
            .properties
            .into_iter()
            .map(Property::try_from)
            .collect::<Result<Vec<_>>>()?;
        let property_enums = dto
            .property_enums
            .into_iter()
            .map(PropertyEnum::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: dto.name,
            id: dto.id,
            is_visible: dto.is_visible,
            actor_type: dto.actor_type,
            properties,
            property_arrays: dto
                .property_arrays
                .into_iter()
                .map(|fields| PropertyArray { fields })
                .collect(),
            property_enums,
            actions: dto.actions.into_iter().map(Action::from).collect(),
            visibility_pending: false,
        })
    }
}

impl Attributes for OperatorActor {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "id" => Some(self.id.into()),
            "is_visible" => Some(self.is_visible.into()),
            "type" => Some(self.actor_type.as_str().into()),
            _ => None,
        }
    }
}
