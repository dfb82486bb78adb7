use crate::io::{KeyValueStore, Storage};
use crate::models::Outline;
use crate::parsing::{convert_to_outline_format, parse_markdown_list, validate_markdown_items};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Markdown has {} invalid line(s)", .0.len())]
    Parse(Vec<String>),
    #[error("Outline is not valid: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("Failed to save outline")]
    Storage,
}

impl ImportError {
    /// Messages to show the user, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::Parse(errors) | ImportError::Invalid(errors) => errors.clone(),
            ImportError::Storage => vec![self.to_string()],
        }
    }
}

/// Creates outlines from markdown and keeps them in the store.
#[derive(Debug)]
pub struct OutlineService<S> {
    storage: Storage<S>,
}

impl<S: KeyValueStore> OutlineService<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: Storage::new(store),
        }
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Parse, validate and save a markdown outline.
    ///
    /// Any parse error rejects the whole document; nothing is saved.
    pub fn import_markdown(
        &self,
        text: &str,
        custom_title: Option<&str>,
    ) -> Result<Outline, ImportError> {
        let parsed = parse_markdown_list(text);
        if parsed.has_errors() {
            return Err(ImportError::Parse(parsed.errors));
        }

        let validation = validate_markdown_items(&parsed.items);
        if !validation.is_valid {
            return Err(ImportError::Invalid(validation.errors));
        }

        let outline = convert_to_outline_format(&parsed, custom_title);
        if !self.storage.save_outline(&outline) {
            return Err(ImportError::Storage);
        }

        log::info!(
            "Imported outline {} with {} items",
            outline.id,
            outline.items.len()
        );
        Ok(outline)
    }

    pub fn outlines(&self) -> Vec<Outline> {
        self.storage.outlines()
    }

    pub fn delete_outline(&self, id: &str) -> bool {
        self.storage.delete_outline(id)
    }
}
