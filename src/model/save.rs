//! Save files and the currently active scenario

use std::fmt;

use esi_core_interface::wire::{ActiveSaveDto, SaveFileDto};

use super::filter::{Attributes, FilterList};
use super::value::AttrValue;

/// The scenario FwESI currently has loaded
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSave {
    scenario_id: i64,
    scenario_name: String,
}

impl ActiveSave {
    pub fn scenario_id(&self) -> i64 {
        self.scenario_id
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }
}

impl From<ActiveSaveDto> for ActiveSave {
    fn from(dto: ActiveSaveDto) -> Self {
        Self {
            scenario_id: dto.scenario_id,
            scenario_name: dto.scenario_name,
        }
    }
}

impl Attributes for ActiveSave {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "scenario_id" => Some(self.scenario_id.into()),
            "scenario_name" => Some(self.scenario_name.as_str().into()),
            _ => None,
        }
    }
}

impl fmt::Display for ActiveSave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Active(scenario_id={}, scenario_name={})",
            self.scenario_id, self.scenario_name
        )
    }
}

/// A loadable scene on the FwESI server. Saves may carry variants as sub saves,
/// each loadable by its own absolute path.
#[derive(Debug, Clone, PartialEq)]
pub struct Save {
    scenario_id: i64,
    scenario_name: String,
    category_name: String,
    absolute_path: String,
    sub_saves: Vec<Save>,
}

impl Save {
    pub fn scenario_id(&self) -> i64 {
        self.scenario_id
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    /// Path on the FwESI machine; also the key used to load the save
    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    pub fn sub_saves(&self) -> FilterList<'_, Save> {
        FilterList::new(&self.sub_saves)
    }

    /// This save or one of its (nested) sub saves with the given path
    pub fn find(&self, absolute_path: &str) -> Option<&Save> {
        if self.absolute_path == absolute_path {
            return Some(self);
        }
        self.sub_saves.iter().find_map(|sub| sub.find(absolute_path))
    }
}

impl From<SaveFileDto> for Save {
    fn from(dto: SaveFileDto) -> Self {
        Self {
            scenario_id: dto.scenario_id,
            scenario_name: dto.scenario_name,
            category_name: dto.category_name,
            absolute_path: dto.absolute_path,
            sub_saves: dto.sub_saves.into_iter().map(Save::from).collect(),
        }
    }
}

impl Attributes for Save {
    fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "scenario_id" => Some(self.scenario_id.into()),
            "scenario_name" => Some(self.scenario_name.as_str().into()),
            "category_name" => Some(self.category_name.as_str().into()),
            "absolute_path" => Some(self.absolute_path.as_str().into()),
            _ => None,
        }
    }
}

impl fmt::Display for Save {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // sub saves are listed by name only to keep the output short
        let subs: Vec<String> = self
            .sub_saves
            .iter()
            .map(|sub| format!("Save(scenario_name={})", sub.scenario_name))
            .collect();
        write!(
            f,
            "Save(scenario_id={}, scenario_name={}, category_name={}, absolute_path={}, sub_saves=[{}])",
            self.scenario_id,
            self.scenario_name,
            self.category_name,
            self.absolute_path,
            subs.join(", ")
        )
    }
}
