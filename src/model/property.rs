//! Scalar parameters on an OperatorActor (ladder height, supports extended, ...)

use std::fmt;

use esi_core_interface::wire::{PropertyDto, PropertyUpdate};
use tracing::warn;

use super::filter::Attributes;
use super::value::AttrValue;
use crate::error::{EsiError, Result};

/// Declared type of a property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Bool,
    String,
    Int,
    Float,
    /// A type name this client does not know; such properties are read-only
    Unknown(String),
}

impl PropertyType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "bool" => PropertyType::Bool,
            "string" => PropertyType::String,
            "int" => PropertyType::Int,
            "float" => PropertyType::Float,
            other => PropertyType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Bool => "bool",
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::Unknown(raw) => raw,
        }
    }

    /// Interpret the textual wire value
    pub fn decode(&self, raw: &str) -> Result<AttrValue> {
        let invalid = || EsiError::InvalidValue(format!("'{}' is not a valid {}", raw, self));
        match self {
            PropertyType::Bool => serde_json::from_str::<bool>(raw.trim())
                .map(AttrValue::Bool)
                .map_err(|_| invalid()),
            PropertyType::Int => raw.trim().parse::<i64>().map(AttrValue::Int).map_err(|_| invalid()),
            PropertyType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(AttrValue::Float)
                .ok_or_else(invalid),
            PropertyType::String | PropertyType::Unknown(_) => Ok(AttrValue::Text(raw.to_string())),
        }
    }

    /// Convert an arbitrary value into this type.
    ///
    /// Floats truncate toward zero when an int is wanted and numbers are truthy
    /// when nonzero. Text is parsed like a wire value.
    pub fn coerce(&self, value: AttrValue) -> Result<AttrValue> {
        match (self, value) {
            (PropertyType::Unknown(raw), _) => Err(EsiError::Unsupported(format!(
                "properties of type '{}' cannot be written",
                raw
            ))),
            (PropertyType::String, v) => Ok(AttrValue::Text(v.to_string())),
            (_, AttrValue::Text(text)) => self.decode(&text),

            (PropertyType::Bool, AttrValue::Bool(b)) => Ok(AttrValue::Bool(b)),
            (PropertyType::Bool, AttrValue::Int(i)) => Ok(AttrValue::Bool(i != 0)),
            (PropertyType::Bool, AttrValue::Float(f)) => Ok(AttrValue::Bool(f != 0.0)),

            (PropertyType::Int, AttrValue::Int(i)) => Ok(AttrValue::Int(i)),
            (PropertyType::Int, AttrValue::Bool(b)) => Ok(AttrValue::Int(i64::from(b))),
            (PropertyType::Int, AttrValue::Float(f)) => {
                if !f.is_finite() {
                    return Err(EsiError::InvalidValue(format!("{} is not a valid int", f)));
                }
                Ok(AttrValue::Int(f.trunc() as i64))
            }

            (PropertyType::Float, AttrValue::Float(f)) => {
                if !f.is_finite() {
                    return Err(EsiError::InvalidValue(format!("{} is not a valid float", f)));
                }
                Ok(AttrValue::Float(f))
            }
            (PropertyType::Float, AttrValue::Int(i)) => Ok(AttrValue::Float(i as f64)),
            (PropertyType::Float, AttrValue::Bool(b)) => {
                Ok(AttrValue::Float(if b { 1.0 } else { 0.0 }))
            }
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A controllable scalar value on an actor.
///
/// `min_value`, `max_value` and `step_size` are integers even for float
/// properties; FwESI's API does not report anything finer.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    display_name: String,
    name: String,
    value_type: PropertyType,
    value: AttrValue,
    min_value: i64,
    max_value: i64,
    step_size: i64,
    pending: bool,
}

impl Property {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &PropertyType {
        &self.value_type
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    pub fn min_value(&self) -> i64 {
        self.min_value
    }

    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    pub fn step_size(&self) -> i64 {
        self.step_size
    }

    /// Whether a new value is waiting to be committed
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Set a new value, converted to this property's type, and mark it for commit
    pub fn set_value(&mut self, value: impl Into<AttrValue>) -> Result<()> {
        let value = self.value_type.coerce(value.into())?;

        if let Some(number) = value.as_f64() {
            if self.min_value < self.max_value
                && (number < self.min_value as f64 || number > self.max_value as f64)
            {
                warn!(
                    "Value {} for '{}' is outside [{}, {}]",
                    number, self.name, self.min_value, self.max_value
                );
            }
        }

        self.value = value;
        self.pending = true;
        Ok(())
    }

    pub(crate) fn pending_update(&self) -> Option<PropertyUpdate> {
        self.pending.then(|| PropertyUpdate {
            name: self.name.clone(),
            value: self.value.to_wire(),
        })
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending = false;
    }
}

impl TryFrom<PropertyDto> for Property {
    type Error = EsiError;

    fn try_from(dto: PropertyDto) -> Result<Self> {
        let value_type = PropertyType::parse(&dto.value_type);
        let value = value_type.decode(&dto.value).map_err(|e| {
            EsiError::Protocol(format!("property '{}': {}", dto.name, e))
        })?;

        Ok(Self {
            display_name: dto.display_name,
            name: dto.name,
            value_type,
            value,
            min_value: dto.min_value,
            max_value: dto.max_value,
            step_size: dto.step_size,
            pending: false,
        })
    }
}

impl Attributes for Property {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "display_name" => Some(self.display_name.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "type" => Some(self.value_type.as_str().into()),
            "value" => Some(self.value.clone()),
            "min_value" => Some(self.min_value.into()),
            "max_value" => Some(self.max_value.into()),
            "step_size" => Some(self.step_size.into()),
            _ => None,
        }
    }
}
