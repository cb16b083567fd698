//! Descriptor-to-config compiler.
//!
//! Compilation runs in two passes when the class declares cross-field
//! constraints:
//!
//! 1. Build a position-keyed directive map: the start field's position gets
//!    `Replace(group)`, the end field's position gets `Remove`.
//! 2. Walk the descriptors in declaration order and apply the directives;
//!    every other descriptor is compiled on its own.
//!
//! Without constraints the first pass is skipped entirely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use udf_model::{ClassDescriptor, ConstraintKind, FieldDescriptor, FieldPair, ModelError};

use crate::builders::{FieldBuilder, builder_for};
use crate::catalog::OptionCatalog;
use crate::config::{CompiledField, FieldConfig, FieldGroup};
use crate::error::{CompileError, Result};

/// What to do with a descriptor whose data type has no input representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedPolicy {
    /// Leave the descriptor out of the compiled form and log a warning.
    #[default]
    Skip,
    /// Fail the whole compilation.
    FailFast,
}

/// Options for [`FormCompiler`].
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Prepended to every field name to form the label translation key.
    pub label_prefix: String,
    pub unmapped: UnmappedPolicy,
    /// Options copied into `Select` fields by enumeration name.
    pub catalog: OptionCatalog,
}

impl CompileOptions {
    pub fn new(label_prefix: impl Into<String>) -> Self {
        Self {
            label_prefix: label_prefix.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_unmapped(mut self, policy: UnmappedPolicy) -> Self {
        self.unmapped = policy;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: OptionCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

enum Directive {
    Replace(FieldGroup),
    Remove,
}

/// Compiles class descriptors into ordered form entries.
#[derive(Debug, Clone, Default)]
pub struct FormCompiler {
    options: CompileOptions,
}

impl FormCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a class descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error when field names are not unique, when a constraint
    /// cannot be resolved to two compilable fields, or (under
    /// [`UnmappedPolicy::FailFast`]) when a descriptor has no input shape.
    pub fn compile(&self, class: &ClassDescriptor) -> Result<Vec<CompiledField>> {
        class
            .ensure_unique_names()
            .map_err(|source| match source {
                ModelError::DuplicateField(field) => CompileError::DuplicateField {
                    class: class.name.clone(),
                    field,
                },
                source => CompileError::Model {
                    class: class.name.clone(),
                    source,
                },
            })?;

        let mut directives = if class.constraints.is_empty() {
            BTreeMap::new()
        } else {
            self.build_directives(class)?
        };

        let mut compiled = Vec::with_capacity(class.fields.len());
        for (position, descriptor) in class.fields.iter().enumerate() {
            match directives.remove(&position) {
                Some(Directive::Replace(group)) => compiled.push(CompiledField::Group(group)),
                Some(Directive::Remove) => {}
                None => {
                    if let Some(field) = self.compile_field(descriptor)? {
                        compiled.push(CompiledField::Field(field));
                    }
                }
            }
        }

        debug!(
            class = %class.name,
            descriptors = class.fields.len(),
            compiled = compiled.len(),
            "compiled class descriptor"
        );
        Ok(compiled)
    }

    /// Compile one descriptor on its own, honoring the unmapped policy.
    pub fn compile_field(&self, descriptor: &FieldDescriptor) -> Result<Option<FieldConfig>> {
        match builder_for(descriptor.data_type) {
            Some(build) => Ok(Some(self.build(build, descriptor))),
            None => match self.options.unmapped {
                UnmappedPolicy::Skip => {
                    warn!(
                        field = %descriptor.field_name,
                        data_type = %descriptor.data_type,
                        "skipping field without input representation"
                    );
                    Ok(None)
                }
                UnmappedPolicy::FailFast => Err(CompileError::UnmappedDataType {
                    field: descriptor.field_name.clone(),
                    data_type: descriptor.data_type,
                }),
            },
        }
    }

    fn build_directives(&self, class: &ClassDescriptor) -> Result<BTreeMap<usize, Directive>> {
        let mut directives = BTreeMap::new();
        for (kind, pair) in &class.constraints {
            let invalid = |message: String| CompileError::InvalidConstraint {
                class: class.name.clone(),
                kind: *kind,
                message,
            };
            if pair.start_field == pair.end_field {
                return Err(invalid(format!(
                    "start and end are the same field '{}'",
                    pair.start_field
                )));
            }

            let start = locate(class, *kind, &pair.start_field)?;
            let end = locate(class, *kind, &pair.end_field)?;
            for position in [start, end] {
                if directives.contains_key(&position) {
                    return Err(invalid(format!(
                        "field '{}' already belongs to another group",
                        class.fields[position].field_name
                    )));
                }
            }

            let start_config = self.compile_member(&class.fields[start], &invalid)?;
            let end_config = self.compile_member(&class.fields[end], &invalid)?;
            let group = build_group(*kind, pair, start_config, end_config);
            debug!(
                class = %class.name,
                group = %group.name,
                start,
                end,
                "recorded group rewrite"
            );
            directives.insert(start, Directive::Replace(group));
            directives.insert(end, Directive::Remove);
        }
        Ok(directives)
    }

    fn compile_member(
        &self,
        descriptor: &FieldDescriptor,
        invalid: &impl Fn(String) -> CompileError,
    ) -> Result<FieldConfig> {
        let build = builder_for(descriptor.data_type).ok_or_else(|| {
            invalid(format!(
                "field '{}' has data type {} with no input representation",
                descriptor.field_name, descriptor.data_type
            ))
        })?;
        Ok(self.build(build, descriptor))
    }

    fn build(&self, build: FieldBuilder, descriptor: &FieldDescriptor) -> FieldConfig {
        let mut field = build(descriptor, &self.options.label_prefix);
        if !self.options.catalog.fill(&mut field) {
            debug!(
                field = %field.field_name,
                source = field.options_source.as_deref().unwrap_or_default(),
                "no options in catalog for select field"
            );
        }
        field
    }
}

fn locate(class: &ClassDescriptor, kind: ConstraintKind, field: &str) -> Result<usize> {
    class
        .position(field)
        .ok_or_else(|| CompileError::MissingDescriptor {
            class: class.name.clone(),
            kind,
            field: field.to_string(),
        })
}

fn build_group(
    kind: ConstraintKind,
    pair: &FieldPair,
    start: FieldConfig,
    end: FieldConfig,
) -> FieldGroup {
    debug_assert_eq!(start.field_name, pair.start_field);
    debug_assert_eq!(end.field_name, pair.end_field);
    match kind {
        ConstraintKind::DateRange => FieldGroup::date_range(start, end),
    }
}

/// Compile a class descriptor with default options and the given label prefix.
pub fn compile(class: &ClassDescriptor, label_prefix: &str) -> Result<Vec<CompiledField>> {
    FormCompiler::new(CompileOptions::new(label_prefix)).compile(class)
}
