//! Enumerated parameters (door OPEN/CLOSED, light modes, ...)

use esi_core_interface::wire::{EnumFieldDto, PropertyEnumDto, PropertyEnumUpdate};

use super::filter::{Attributes, FilterList};
use super::value::AttrValue;
use crate::error::{EsiError, Result};

/// One allowed value of a [`PropertyEnum`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumField {
    enum_field_id: i64,
    enum_field_value: String,
}

impl EnumField {
    pub fn enum_field_id(&self) -> i64 {
        self.enum_field_id
    }

    pub fn enum_field_value(&self) -> &str {
        &self.enum_field_value
    }

    fn to_wire(&self) -> EnumFieldDto {
        EnumFieldDto {
            enum_field_id: self.enum_field_id,
            enum_field_value: self.enum_field_value.clone(),
        }
    }
}

impl From<EnumFieldDto> for EnumField {
    fn from(dto: EnumFieldDto) -> Self {
        Self {
            enum_field_id: dto.enum_field_id,
            enum_field_value: dto.enum_field_value,
        }
    }
}

impl Attributes for EnumField {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "enum_field_id" => Some(self.enum_field_id.into()),
            "enum_field_value" => Some(self.enum_field_value.as_str().into()),
            _ => None,
        }
    }
}

/// A parameter restricted to a fixed set of values
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEnum {
    name: String,
    enum_type: String,
    display_name: String,
    all_values: Vec<EnumField>,
    current: usize,
    pending: bool,
}

impl PropertyEnum {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type string as reported by FwESI
    pub fn enum_type(&self) -> &str {
        &self.enum_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn all_values(&self) -> FilterList<'_, EnumField> {
        FilterList::new(&self.all_values)
    }

    pub fn current_value(&self) -> &EnumField {
        &self.all_values[self.current]
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Select `value`, which must be one of [`all_values`](Self::all_values)
    pub fn set_current(&mut self, value: &EnumField) -> Result<()> {
        let index = self
            .all_values
            .iter()
            .position(|field| field == value)
            .ok_or_else(|| EsiError::UnknownEnumValue {
                enum_name: self.name.clone(),
                value: value.enum_field_value.clone(),
            })?;

        self.current = index;
        self.pending = true;
        Ok(())
    }

    /// Select the allowed value whose `enum_field_value` is `value`
    pub fn set_current_by_value(&mut self, value: &str) -> Result<()> {
        let field = self
            .all_values
            .iter()
            .find(|field| field.enum_field_value == value)
            .cloned()
            .ok_or_else(|| EsiError::UnknownEnumValue {
                enum_name: self.name.clone(),
                value: value.to_string(),
            })?;
        self.set_current(&field)
    }

    pub(crate) fn pending_update(&self) -> Option<PropertyEnumUpdate> {
        self.pending.then(|| PropertyEnumUpdate {
            name: self.name.clone(),
            current_value: self.current_value().to_wire(),
        })
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending = false;
    }
}

impl TryFrom<PropertyEnumDto> for PropertyEnum {
    type Error = EsiError;

    fn try_from(dto: PropertyEnumDto) -> Result<Self> {
        let all_values: Vec<EnumField> = dto.all_values.into_iter().map(EnumField::from).collect();

        // the current value must be one of the listed ones, matched by id
        let current = all_values
            .iter()
            .position(|field| field.enum_field_id == dto.current_value.enum_field_id)
            .ok_or_else(|| {
                EsiError::Protocol(format!(
                    "enum '{}' reports current value id {} which is not in allValues",
                    dto.name, dto.current_value.enum_field_id
                ))
            })?;

        Ok(Self {
            name: dto.name,
            enum_type: dto.enum_type,
            display_name: dto.display_name,
            all_values,
            current,
            pending: false,
        })
    }
}

impl Attributes for PropertyEnum {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "type" => Some(self.enum_type.as_str().into()),
            "display_name" => Some(self.display_name.as_str().into()),
            "current_value" => Some(self.current_value().enum_field_value.as_str().into()),
            _ => None,
        }
    }
}
