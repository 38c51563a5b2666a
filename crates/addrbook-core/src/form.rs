//! Form-state container: the current string value of every field of a form.
//!
//! Fields are typed enums rather than free-form names. The name-keyed change
//! handler still exists for presentation layers that only know the field's
//! name, but it rejects names the form does not have.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("no initial value for form field: {0}")]
    MissingField(&'static str),
}

/// A field identifier of one logical form.
pub trait FormField: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every field of the form, in display order.
    const ALL: &'static [Self];

    /// Name used by the change handler, e.g. `postCode`.
    fn name(self) -> &'static str;

    /// Human-readable placeholder, e.g. `Post Code`.
    fn label(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Fields of the address-lookup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    PostCode,
    HouseNumber,
}

impl FormField for LookupField {
    const ALL: &'static [Self] = &[Self::PostCode, Self::HouseNumber];

    fn name(self) -> &'static str {
        match self {
            Self::PostCode => "postCode",
            Self::HouseNumber => "houseNumber",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::PostCode => "Post Code",
            Self::HouseNumber => "House number",
        }
    }
}

/// Fields of the personal-info form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    FirstName,
    LastName,
}

impl FormField for PersonField {
    const ALL: &'static [Self] = &[Self::FirstName, Self::LastName];

    fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
        }
    }
}

/// Current values of a form, plus the values it was constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<F: FormField> {
    initial: HashMap<F, String>,
    values: HashMap<F, String>,
}

impl<F: FormField> Form<F> {
    /// Create a form from an initial value for every field.
    ///
    /// Fails with [`FormError::MissingField`] if any field of `F` is left out.
    pub fn new<I, S>(initial: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (F, S)>,
        S: Into<String>,
    {
        let initial: HashMap<F, String> = initial.into_iter().map(|(f, v)| (f, v.into())).collect();
        if let Some(missing) = F::ALL.iter().find(|f| !initial.contains_key(*f)) {
            return Err(FormError::MissingField(missing.name()));
        }
        Ok(Self {
            values: initial.clone(),
            initial,
        })
    }

    /// Create a form from name-keyed initial values.
    ///
    /// Unknown names fail with [`FormError::UnknownField`].
    pub fn from_names<'a, I>(initial: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let typed = initial
            .into_iter()
            .map(|(name, value)| {
                F::from_name(name)
                    .map(|f| (f, value))
                    .ok_or_else(|| FormError::UnknownField(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(typed)
    }

    /// A form whose fields all start out empty.
    pub fn empty() -> Self {
        let initial: HashMap<F, String> = F::ALL.iter().map(|f| (*f, String::new())).collect();
        Self {
            values: initial.clone(),
            initial,
        }
    }

    pub fn get(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Whether `field` currently holds a non-empty value.
    pub fn is_filled(&self, field: F) -> bool {
        !self.get(field).is_empty()
    }

    /// Replace the value of one field.
    pub fn set(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Shared change handler keyed by field name.
    pub fn handle_change(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = F::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        debug!(field = name, "form field changed");
        self.set(field, value);
        Ok(())
    }

    /// Restore the values the form was constructed with.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
    }

    /// `(name, value)` pairs in field order.
    pub fn values(&self) -> Vec<(&'static str, &str)> {
        F::ALL.iter().map(|f| (f.name(), self.get(*f))).collect()
    }
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self::empty()
    }
}
