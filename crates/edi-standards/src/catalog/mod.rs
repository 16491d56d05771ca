//! Compiled-in catalog declarations.
//!
//! Each grammar version has its own module declaring the element
//! definitions shared by that version's segments and the segments
//! themselves. [`declare`] registers one version into a builder.

mod v004010;
mod v005010;

use std::sync::Arc;

use edi_model::{
    CodeList, ConditionalRule, ElementDefinition, ElementType, Requirement, SegmentDefinition,
};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::registry::RegistryBuilder;

pub const X12_004010: &str = "004010";
pub const X12_005010: &str = "005010";

/// Versions with compiled-in catalogs.
pub const KNOWN_VERSIONS: &[&str] = &[X12_004010, X12_005010];

/// Register the compiled-in catalog for `version`.
///
/// # Errors
///
/// Returns [`CatalogError::UnsupportedVersion`] for labels outside
/// [`KNOWN_VERSIONS`].
pub fn declare(version: &str, builder: &mut RegistryBuilder) -> Result<()> {
    debug!(version, "declaring compiled-in catalog");
    match version.trim() {
        X12_004010 => v004010::declare(builder),
        X12_005010 => v005010::declare(builder),
        other => Err(CatalogError::UnsupportedVersion {
            version: other.to_string(),
        }),
    }
}

fn element(
    code: &str,
    name: &str,
    element_type: edi_model::Result<ElementType>,
) -> Result<Arc<ElementDefinition>> {
    Ok(Arc::new(ElementDefinition::new(code, name, element_type?)?))
}

fn codes(entries: &[(&str, &str)]) -> edi_model::Result<CodeList> {
    CodeList::new(entries.iter().copied())
}

/// Element definitions whose shape is identical in both versions.
struct Common {
    date_time_qualifier: Arc<ElementDefinition>,
    date_time_format: Arc<ElementDefinition>,
    date_time_period: Arc<ElementDefinition>,
    reference_qualifier: Arc<ElementDefinition>,
    description: Arc<ElementDefinition>,
    reference_identifier: Arc<ElementDefinition>,
    contact_function: Arc<ElementDefinition>,
    contact_name: Arc<ElementDefinition>,
    communication_qualifier: Arc<ElementDefinition>,
    entity_identifier: Arc<ElementDefinition>,
    entity_type: Arc<ElementDefinition>,
    middle_name: Arc<ElementDefinition>,
    name_prefix: Arc<ElementDefinition>,
    name_suffix: Arc<ElementDefinition>,
    id_qualifier: Arc<ElementDefinition>,
    id_code: Arc<ElementDefinition>,
    entity_relationship: Arc<ElementDefinition>,
}

impl Common {
    fn declare() -> Result<Self> {
        Ok(Self {
            date_time_qualifier: element(
                "374",
                "Date/Time Qualifier",
                ElementType::coded(
                    codes(&[
                        ("096", "Discharge"),
                        ("232", "Claim Statement Period Start"),
                        ("233", "Claim Statement Period End"),
                        ("434", "Statement"),
                        ("435", "Admission"),
                        ("472", "Service"),
                        ("573", "Date Claim Paid"),
                    ])?,
                    3,
                    3,
                ),
            )?,
            date_time_format: element(
                "1250",
                "Date Time Period Format Qualifier",
                ElementType::coded(
                    codes(&[
                        ("D8", "Date Expressed in Format CCYYMMDD"),
                        ("DT", "Date and Time Expressed in Format CCYYMMDDHHMM"),
                        ("RD8", "Range of Dates Expressed in Format CCYYMMDD-CCYYMMDD"),
                        ("TM", "Time Expressed in Format HHMM"),
                    ])?,
                    2,
                    3,
                ),
            )?,
            date_time_period: element(
                "1251",
                "Date Time Period",
                ElementType::string(1, 35),
            )?,
            reference_qualifier: element(
                "128",
                "Reference Identification Qualifier",
                ElementType::identifier(2, 3),
            )?,
            description: element("352", "Description", ElementType::string(1, 80))?,
            reference_identifier: element(
                "C040",
                "Reference Identifier",
                ElementType::string(1, 50),
            )?,
            contact_function: element(
                "366",
                "Contact Function Code",
                ElementType::coded(
                    codes(&[("BL", "Technical Department"), ("IC", "Information Contact")])?,
                    2,
                    2,
                ),
            )?,
            contact_name: element("93", "Name", ElementType::string(1, 60))?,
            communication_qualifier: element(
                "365",
                "Communication Number Qualifier",
                ElementType::coded(
                    codes(&[
                        ("EM", "Electronic Mail"),
                        ("EX", "Telephone Extension"),
                        ("FX", "Facsimile"),
                        ("TE", "Telephone"),
                        ("UR", "Uniform Resource Locator (URL)"),
                    ])?,
                    2,
                    2,
                ),
            )?,
            entity_identifier: element(
                "98",
                "Entity Identifier Code",
                ElementType::identifier(2, 3),
            )?,
            entity_type: element(
                "1065",
                "Entity Type Qualifier",
                ElementType::coded(codes(&[("1", "Person"), ("2", "Non-Person Entity")])?, 1, 1),
            )?,
            middle_name: element("1037", "Name Middle", ElementType::string(1, 25))?,
            name_prefix: element("1038", "Name Prefix", ElementType::string(1, 10))?,
            name_suffix: element("1039", "Name Suffix", ElementType::string(1, 10))?,
            id_qualifier: element(
                "66",
                "Identification Code Qualifier",
                ElementType::coded(
                    codes(&[
                        ("24", "Employer's Identification Number"),
                        ("34", "Social Security Number"),
                        ("46", "Electronic Transmitter Identification Number (ETIN)"),
                        ("FI", "Federal Taxpayer's Identification Number"),
                        ("II", "Standard Unique Health Identifier"),
                        ("MI", "Member Identification Number"),
                        ("PI", "Payor Identification"),
                        ("XX", "Centers for Medicare and Medicaid Services National Provider Identifier"),
                    ])?,
                    1,
                    2,
                ),
            )?,
            id_code: element("67", "Identification Code", ElementType::string(2, 80))?,
            entity_relationship: element(
                "706",
                "Entity Relationship Code",
                ElementType::identifier(2, 2),
            )?,
        })
    }
}

fn mandatory() -> Requirement {
    Requirement::Mandatory
}

fn optional() -> Requirement {
    Requirement::Optional
}

fn situational(note: &str) -> Requirement {
    Requirement::situational(note)
}

/// DTP is unchanged between the two versions.
fn date_time_period(common: &Common) -> Result<SegmentDefinition> {
    Ok(
        SegmentDefinition::builder("DTP", "Date or Time or Period")
            .purpose("To specify any or all of a date, a time, or a time period")
            .element(Arc::clone(&common.date_time_qualifier), mandatory())
            .element(Arc::clone(&common.date_time_format), mandatory())
            .element(Arc::clone(&common.date_time_period), mandatory())
            .build()?,
    )
}

/// REF differs between versions only in the width of REF02.
fn reference_information(
    common: &Common,
    reference_id: &Arc<ElementDefinition>,
) -> Result<SegmentDefinition> {
    Ok(SegmentDefinition::builder("REF", "Reference Information")
        .purpose("To specify identifying information")
        .element(Arc::clone(&common.reference_qualifier), mandatory())
        .element(Arc::clone(reference_id), situational("R0203"))
        .element(Arc::clone(&common.description), situational("R0203"))
        .element(Arc::clone(&common.reference_identifier), optional())
        .rule(ConditionalRule::at_least_one([2, 3])?)
        .build()?)
}
