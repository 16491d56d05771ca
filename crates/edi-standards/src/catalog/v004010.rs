//! ASC X12 version 4010 declarations.

use std::sync::Arc;

use edi_model::{ConditionalRule, ElementType, SegmentDefinition};

use super::{
    Common, X12_004010, date_time_period, element, mandatory, optional, reference_information,
    situational,
};
use crate::error::Result;
use crate::registry::RegistryBuilder;

pub(super) fn declare(builder: &mut RegistryBuilder) -> Result<()> {
    let common = Common::declare()?;
    let reference_id = element("127", "Reference Identification", ElementType::string(1, 30))?;
    let communication_number = element("364", "Communication Number", ElementType::string(1, 80))?;
    let last_name = element(
        "1035",
        "Name Last or Organization Name",
        ElementType::string(1, 35),
    )?;
    let first_name = element("1036", "Name First", ElementType::string(1, 25))?;

    let contact = SegmentDefinition::builder("PER", "Administrative Communications Contact")
        .purpose("To identify a person or office to whom administrative communications should be directed")
        .element(Arc::clone(&common.contact_function), mandatory())
        .element(Arc::clone(&common.contact_name), optional())
        .element(Arc::clone(&common.communication_qualifier), situational("P0304"))
        .element(Arc::clone(&communication_number), situational("P0304"))
        .element(Arc::clone(&common.communication_qualifier), situational("P0506"))
        .element(Arc::clone(&communication_number), situational("P0506"))
        .element(Arc::clone(&common.communication_qualifier), situational("P0708"))
        .element(Arc::clone(&communication_number), situational("P0708"))
        .rules([
            ConditionalRule::paired([3, 4])?,
            ConditionalRule::paired([5, 6])?,
            ConditionalRule::paired([7, 8])?,
        ])
        .build()?;

    let name = SegmentDefinition::builder("NM1", "Individual or Organizational Name")
        .purpose("To supply the full name of an individual or organizational entity")
        .element(Arc::clone(&common.entity_identifier), mandatory())
        .element(Arc::clone(&common.entity_type), mandatory())
        .element(Arc::clone(&last_name), optional())
        .element(Arc::clone(&first_name), optional())
        .element(Arc::clone(&common.middle_name), optional())
        .element(Arc::clone(&common.name_prefix), optional())
        .element(Arc::clone(&common.name_suffix), optional())
        .element(Arc::clone(&common.id_qualifier), situational("P0809"))
        .element(Arc::clone(&common.id_code), situational("P0809"))
        .element(Arc::clone(&common.entity_relationship), situational("C1110"))
        .element(Arc::clone(&common.entity_identifier), situational("C1110"))
        .rules([
            ConditionalRule::paired([8, 9])?,
            ConditionalRule::conditional(11, [10])?,
        ])
        .build()?;

    builder.register_all(
        X12_004010,
        [
            date_time_period(&common)?,
            reference_information(&common, &reference_id)?,
            contact,
            name,
        ],
    )?;
    Ok(())
}
