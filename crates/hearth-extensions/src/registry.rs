//! Ordered registry of extension descriptors.
//!
//! Unlike a lookup table, the [`ExtensionRegistry`] preserves registration
//! order: option aggregation walks extensions in the order they were
//! discovered, and the first extension to declare an option name owns it.

use crate::descriptor::ExtensionDescriptor;
use crate::error::ExtensionError;

/// Registry of installed extensions.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<ExtensionDescriptor>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor after validation.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::InvalidDescriptor`] when validation fails,
    /// or [`ExtensionError::Duplicate`] when the name is already taken.
    pub fn register(&mut self, descriptor: ExtensionDescriptor) -> Result<(), ExtensionError> {
        descriptor.validate()?;
        if self.get(descriptor.name()).is_some() {
            return Err(ExtensionError::Duplicate {
                name: descriptor.name().to_owned(),
            });
        }
        self.extensions.push(descriptor);
        Ok(())
    }

    /// Looks up an extension by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExtensionDescriptor> {
        self.extensions
            .iter()
            .find(|descriptor| descriptor.name() == name)
    }

    /// Iterates extensions in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtensionDescriptor> {
        self.extensions.iter()
    }

    /// Returns the registered descriptors in order.
    #[must_use]
    pub const fn as_slice(&self) -> &[ExtensionDescriptor] {
        self.extensions.as_slice()
    }

    /// Returns the number of registered extensions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns `true` when no extensions are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExtensionRegistry {
    type Item = &'a ExtensionDescriptor;
    type IntoIter = std::slice::Iter<'a, ExtensionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
