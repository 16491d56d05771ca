//! Segment validation entry points.

use edi_model::{RawSegment, SegmentDefinition, ValidatedRecord, Version};
use edi_standards::{RegistryError, VersionRegistry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::assemble::assemble;
use crate::options::ValidationOptions;
use crate::violation::Violation;
use crate::{conditional, structural};

/// Outcome of validating one segment: a record, or every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentOutcome {
    Valid(ValidatedRecord),
    Invalid(Vec<Violation>),
}

impl SegmentOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, SegmentOutcome::Valid(_))
    }

    /// Violations found; empty for a valid segment.
    pub fn violations(&self) -> &[Violation] {
        match self {
            SegmentOutcome::Valid(_) => &[],
            SegmentOutcome::Invalid(violations) => violations,
        }
    }

    pub fn record(&self) -> Option<&ValidatedRecord> {
        match self {
            SegmentOutcome::Valid(record) => Some(record),
            SegmentOutcome::Invalid(_) => None,
        }
    }

    pub fn into_result(self) -> Result<ValidatedRecord, Vec<Violation>> {
        match self {
            SegmentOutcome::Valid(record) => Ok(record),
            SegmentOutcome::Invalid(violations) => Err(violations),
        }
    }
}

/// Validates tokenized segments against a sealed [`VersionRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a VersionRegistry,
    options: ValidationOptions,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a VersionRegistry) -> Self {
        Self {
            registry,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate one segment under `version`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSegment`] when the registry has no
    /// definition for the segment in that version. Data problems are never
    /// errors; they come back as [`SegmentOutcome::Invalid`].
    pub fn validate(
        &self,
        version: &str,
        raw: &RawSegment,
    ) -> Result<SegmentOutcome, RegistryError> {
        let (version, definition) = self.registry.resolve(version, raw.segment_id.trim())?;
        Ok(validate_segment(definition, version, raw, &self.options))
    }

    /// Validate against an explicit definition, bypassing the registry.
    pub fn validate_definition(
        &self,
        definition: &SegmentDefinition,
        version: &Version,
        raw: &RawSegment,
    ) -> SegmentOutcome {
        validate_segment(definition, version, raw, &self.options)
    }

    /// Validate many segments in parallel. Results keep input order.
    pub fn validate_batch(
        &self,
        version: &str,
        segments: &[RawSegment],
    ) -> Vec<Result<SegmentOutcome, RegistryError>> {
        debug!(version, segments = segments.len(), "validating batch");
        segments
            .par_iter()
            .map(|raw| self.validate(version, raw))
            .collect()
    }
}

/// Run the structural pass, the conditional pass and, if both are clean,
/// record assembly.
pub fn validate_segment(
    definition: &SegmentDefinition,
    version: &Version,
    raw: &RawSegment,
    options: &ValidationOptions,
) -> SegmentOutcome {
    let _span = debug_span!(
        "validate_segment",
        segment = %definition.id(),
        version = %version
    )
    .entered();

    if raw.segment_id.trim() != definition.id().as_str() {
        warn!(
            raw = %raw.segment_id,
            definition = %definition.id(),
            "segment id does not match definition"
        );
    }

    let report = structural::check(definition, raw, options);
    let rule_violations = conditional::check(definition, |position| report.is_present(position));

    if report.violations.is_empty() && rule_violations.is_empty() {
        let record = assemble(definition, version, report.values);
        debug!(fields = record.len(), "segment valid");
        return SegmentOutcome::Valid(record);
    }

    let mut violations = report.violations;
    violations.extend(rule_violations);
    debug!(violations = violations.len(), "segment invalid");
    SegmentOutcome::Invalid(violations)
}
