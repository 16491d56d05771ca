//! Record assembly for segments with no violations.

use edi_model::{ElementValue, RecordField, SegmentDefinition, ValidatedRecord, Version};

/// Build a record from the structural pass's parsed values. Absent
/// positions are skipped.
pub(crate) fn assemble(
    definition: &SegmentDefinition,
    version: &Version,
    values: Vec<Option<ElementValue>>,
) -> ValidatedRecord {
    let fields = definition
        .elements()
        .iter()
        .zip(values)
        .filter_map(|(element, value)| {
            Some(RecordField {
                position: element.position(),
                code: element.definition().code().clone(),
                value: value?,
            })
        })
        .collect();
    ValidatedRecord {
        segment_id: definition.id().clone(),
        version: version.clone(),
        fields,
    }
}
