//! "Add View" menu built from per-department section declarations.
//!
//! # Responsibility
//! - Hold the static `{ title, options }` groups a department offers.
//! - Produce the localized menu on demand.
//!
//! # Invariants
//! - Labels are translated at build time, never stored localized.
//! - The built menu is reused (same `Rc`) until the active language changes.

use crate::i18n::{Language, Translator};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// One selectable optional view, as declared by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOptionDecl {
    pub id: String,
    pub label_key: String,
    pub icon: String,
    #[serde(default)]
    pub description_key: String,
}

impl DashboardOptionDecl {
    pub fn new(
        id: impl Into<String>,
        label_key: impl Into<String>,
        icon: impl Into<String>,
        description_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label_key: label_key.into(),
            icon: icon.into(),
            description_key: description_key.into(),
        }
    }
}

/// One labeled group of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSectionDecl {
    pub title_key: String,
    pub options: Vec<DashboardOptionDecl>,
}

impl DashboardSectionDecl {
    pub fn new(title_key: impl Into<String>) -> Self {
        Self {
            title_key: title_key.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: DashboardOptionDecl) -> Self {
        self.options.push(option);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOption {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSection {
    pub title: String,
    pub options: Vec<DashboardOption>,
}

/// Localized menu cache over a department's declarations.
#[derive(Debug, Default)]
pub struct DashboardSectionIndex {
    decls: Vec<DashboardSectionDecl>,
    cache: RefCell<Option<(Language, Rc<[DashboardSection]>)>>,
}

impl DashboardSectionIndex {
    pub fn new(decls: Vec<DashboardSectionDecl>) -> Self {
        Self {
            decls,
            cache: RefCell::new(None),
        }
    }

    pub fn decls(&self) -> &[DashboardSectionDecl] {
        &self.decls
    }

    pub fn is_empty(&self) -> bool {
        self.decls.iter().all(|section| section.options.is_empty())
    }

    /// Returns the localized menu, rebuilding only when the language changed.
    pub fn sections(&self, translator: &dyn Translator) -> Rc<[DashboardSection]> {
        let language = translator.language();
        if let Some((cached_language, sections)) = self.cache.borrow().as_ref() {
            if *cached_language == language {
                return Rc::clone(sections);
            }
        }

        let built: Rc<[DashboardSection]> = self
            .decls
            .iter()
            .map(|section| localize_section(section, translator))
            .collect();
        *self.cache.borrow_mut() = Some((language, Rc::clone(&built)));
        built
    }

    /// Drops the cached menu; the next `sections` call rebuilds it.
    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }

    /// Finds an option declaration by view id across all sections.
    pub fn option(&self, view_id: &str) -> Option<&DashboardOptionDecl> {
        self.decls
            .iter()
            .flat_map(|section| section.options.iter())
            .find(|option| option.id == view_id)
    }

    pub fn contains(&self, view_id: &str) -> bool {
        self.option(view_id).is_some()
    }

    /// All declared option ids in menu order.
    pub fn option_ids(&self) -> Vec<&str> {
        self.decls
            .iter()
            .flat_map(|section| section.options.iter())
            .map(|option| option.id.as_str())
            .collect()
    }
}

fn localize_section(
    section: &DashboardSectionDecl,
    translator: &dyn Translator,
) -> DashboardSection {
    DashboardSection {
        title: translator.translate(&section.title_key),
        options: section
            .options
            .iter()
            .map(|option| DashboardOption {
                id: option.id.clone(),
                label: translator.translate(&option.label_key),
                icon: option.icon.clone(),
                description: if option.description_key.is_empty() {
                    String::new()
                } else {
                    translator.translate(&option.description_key)
                },
            })
            .collect(),
    }
}
