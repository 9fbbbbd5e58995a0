//! One-shot actions exposed as buttons in FwESI (horn, siren, ...)

use esi_core_interface::wire::{ActionDto, ActionTrigger};

use super::filter::Attributes;
use super::value::AttrValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    name: String,
    display_name: String,
    button_name: String,
    triggered: bool,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn button_name(&self) -> &str {
        &self.button_name
    }

    pub fn is_pending(&self) -> bool {
        self.triggered
    }

    /// Queue the action; it fires when the actor is committed
    pub fn trigger(&mut self) {
        self.triggered = true;
    }

    pub(crate) fn pending_update(&self) -> Option<ActionTrigger> {
        self.triggered.then(|| ActionTrigger {
            name: self.name.clone(),
        })
    }

    pub(crate) fn clear_pending(&mut self) {
        self.triggered = false;
    }
}

impl From<ActionDto> for Action {
    fn from(dto: ActionDto) -> Self {
        Self {
            name: dto.name,
            display_name: dto.display_name,
            button_name: dto.button_name,
            triggered: false,
        }
    }
}

impl Attributes for Action {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(self.name.as_str().into()),
            "display_name" => Some(self.display_name.as_str().into()),
            "button_name" => Some(self.button_name.as_str().into()),
            _ => None,
        }
    }
}
