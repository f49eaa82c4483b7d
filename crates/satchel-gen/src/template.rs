//! Basis templates.
//!
//! Each generated document either extends a copy of a basis document or starts
//! empty. The choice is made once per document with [`Template::resolve`].

use serde::de::DeserializeOwned;

use satchel_spec::{AnimatorController, BasisRefs, ExpressionParameters, ExpressionsMenu};

use crate::error::GenResult;
use crate::store::{load_document, AssetStore};

/// A document to extend: a copy of a basis, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Template<T> {
    /// Copy of the basis document.
    Basis(T),
    /// No basis; start from an empty document.
    Fresh,
}

impl<T> Template<T> {
    /// Chooses between basis and fresh.
    pub fn resolve(basis: Option<T>) -> Self {
        match basis {
            Some(doc) => Template::Basis(doc),
            None => Template::Fresh,
        }
    }
}

impl<T: Default> Template<T> {
    /// The document to extend.
    pub fn into_document(self) -> T {
        match self {
            Template::Basis(doc) => doc,
            Template::Fresh => T::default(),
        }
    }
}

/// Basis documents loaded for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasisDocuments {
    pub parameters: Option<ExpressionParameters>,
    pub menu: Option<ExpressionsMenu>,
    pub controller: Option<AnimatorController>,
}

impl BasisDocuments {
    /// No basis documents.
    pub fn none() -> Self {
        Self::default()
    }

    /// Loads every referenced basis document from the store.
    pub fn load(refs: &BasisRefs, store: &dyn AssetStore) -> GenResult<Self> {
        Ok(Self {
            parameters: load_optional(store, refs.parameters.as_deref())?,
            menu: load_optional(store, refs.menu.as_deref())?,
            controller: load_optional(store, refs.controller.as_deref())?,
        })
    }
}

fn load_optional<T: DeserializeOwned>(
    store: &dyn AssetStore,
    path: Option<&str>,
) -> GenResult<Option<T>> {
    path.map(|p| load_document(store, p)).transpose()
}
