//! ASC X12 version 5010 declarations.

use std::sync::Arc;

use edi_model::{ConditionalRule, ElementType, SegmentDefinition};

use super::{
    Common, X12_005010, date_time_period, element, mandatory, optional, reference_information,
    situational,
};
use crate::error::Result;
use crate::registry::RegistryBuilder;

pub(super) fn declare(builder: &mut RegistryBuilder) -> Result<()> {
    let common = Common::declare()?;
    let reference_id = element("127", "Reference Identification", ElementType::string(1, 50))?;
    let communication_number =
        element("364", "Communication Number", ElementType::string(1, 256))?;
    let inquiry_reference = element("443", "Contact Inquiry Reference", ElementType::string(1, 20))?;
    let last_name = element(
        "1035",
        "Name Last or Organization Name",
        ElementType::string(1, 60),
    )?;
    let first_name = element("1036", "Name First", ElementType::string(1, 35))?;

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
        .element(inquiry_reference, optional())
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
        .element(Arc::clone(&last_name), situational("C1203"))
        .element(Arc::clone(&first_name), optional())
        .element(Arc::clone(&common.middle_name), optional())
        .element(Arc::clone(&common.name_prefix), optional())
        .element(Arc::clone(&common.name_suffix), optional())
        .element(Arc::clone(&common.id_qualifier), situational("P0809"))
        .element(Arc::clone(&common.id_code), situational("P0809"))
        .element(Arc::clone(&common.entity_relationship), situational("C1110"))
        .element(Arc::clone(&common.entity_identifier), situational("C1110"))
        .element(Arc::clone(&last_name), optional())
        .rules([
            ConditionalRule::paired([8, 9])?,
            ConditionalRule::conditional(11, [10])?,
            ConditionalRule::conditional(12, [3])?,
        ])
        .build()?;

    // Element list, type and rules for SV6 are not yet settled.
    let anesthesia = SegmentDefinition::builder("SV6", "Anesthesia Service")
        .purpose("")
        .build()?;

    builder.register_all(
        X12_005010,
        [
            date_time_period(&common)?,
            reference_information(&common, &reference_id)?,
            contact,
            name,
            anesthesia,
        ],
    )?;
    Ok(())
}
