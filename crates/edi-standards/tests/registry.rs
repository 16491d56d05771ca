use std::sync::Arc;

use anyhow::Result;
use edi_model::{ElementDefinition, ElementType, Requirement, SegmentDefinition};
use edi_standards::{
    CatalogConfig, CatalogError, RegistryError, VersionRegistry, X12_004010, X12_005010,
};

fn placeholder() -> SegmentDefinition {
    SegmentDefinition::builder("SV6", "Anesthesia Service")
        .purpose("")
        .build()
        .expect("placeholder")
}

#[test]
fn lookup_returns_the_registered_definition() -> Result<()> {
    let definition = Arc::new(placeholder());
    let mut builder = VersionRegistry::builder();
    builder.register("005010", Arc::clone(&definition))?;
    let registry = builder.build();

    let found = registry.lookup("005010", "SV6")?;
    assert!(Arc::ptr_eq(found, &definition));
    assert_eq!(found.purpose(), "");
    Ok(())
}

#[test]
fn versions_are_isolated() -> Result<()> {
    let mut builder = VersionRegistry::builder();
    builder.register("005010", placeholder())?;
    let registry = builder.build();

    assert!(registry.contains("005010", "SV6"));
    assert_eq!(
        registry.lookup("004010", "SV6").unwrap_err(),
        RegistryError::UnknownSegment {
            version: "004010".to_string(),
            segment_id: "SV6".to_string(),
        }
    );
    Ok(())
}

#[test]
fn same_segment_registers_under_two_versions() -> Result<()> {
    let mut builder = VersionRegistry::builder();
    builder
        .register("004010", placeholder())?
        .register("005010", placeholder())?;
    let registry = builder.build();

    assert_eq!(registry.len(), 2);
    let versions: Vec<&str> = registry.versions().map(|v| v.as_str()).collect();
    assert_eq!(versions, vec!["004010", "005010"]);
    Ok(())
}

#[test]
fn element_codes_are_shared_within_a_version() -> Result<()> {
    let description = Arc::new(ElementDefinition::new(
        "352",
        "Description",
        ElementType::string(1, 80)?,
    )?);
    let note = SegmentDefinition::builder("NTE", "Note")
        .element(Arc::clone(&description), Requirement::Mandatory)
        .build()?;
    let message = SegmentDefinition::builder("MSG", "Message Text")
        .element(Arc::clone(&description), Requirement::Optional)
        .build()?;

    let mut builder = VersionRegistry::builder();
    builder.register("005010", note)?.register("005010", message)?;
    let registry = builder.build();

    let bound = registry.element("005010", "352").expect("element 352");
    assert!(Arc::ptr_eq(bound, &description));
    assert!(registry.element("004010", "352").is_none());
    Ok(())
}

#[test]
fn load_compiled_catalogs() -> Result<()> {
    let registry = VersionRegistry::load_all()?;

    for segment in ["DTP", "REF", "PER", "NM1"] {
        assert!(registry.contains(X12_004010, segment), "{segment} in 4010");
        assert!(registry.contains(X12_005010, segment), "{segment} in 5010");
    }
    assert!(registry.contains(X12_005010, "SV6"));
    assert!(!registry.contains(X12_004010, "SV6"));
    Ok(())
}

#[test]
fn sv6_is_an_empty_placeholder() -> Result<()> {
    let registry = VersionRegistry::load(&CatalogConfig::only(X12_005010))?;
    let sv6 = registry.lookup(X12_005010, "SV6")?;

    assert_eq!(sv6.name(), "Anesthesia Service");
    assert_eq!(sv6.purpose(), "");
    assert!(sv6.elements().is_empty());
    assert!(sv6.rules().is_empty());
    Ok(())
}

#[test]
fn versions_differ_structurally() -> Result<()> {
    let registry = VersionRegistry::load_all()?;

    let max_len = |version: &str, segment: &str, position: usize| -> usize {
        registry
            .lookup(version, segment)
            .expect("segment")
            .element(position)
            .expect("position")
            .definition()
            .element_type()
            .max_length()
    };
    assert_eq!(max_len(X12_004010, "REF", 2), 30);
    assert_eq!(max_len(X12_005010, "REF", 2), 50);
    assert_eq!(max_len(X12_004010, "PER", 4), 80);
    assert_eq!(max_len(X12_005010, "PER", 8), 256);

    let nm1_4010 = registry.lookup(X12_004010, "NM1")?;
    let nm1_5010 = registry.lookup(X12_005010, "NM1")?;
    assert_eq!(nm1_4010.len(), 11);
    assert_eq!(nm1_5010.len(), 12);
    assert!(nm1_4010.rule("C1203").is_none());
    assert!(nm1_5010.rule("C1203").is_some());
    assert_eq!(
        nm1_5010.element(3).expect("NM103").requirement().to_string(),
        "X:C1203"
    );
    Ok(())
}

#[test]
fn per_shares_element_definitions_across_positions() -> Result<()> {
    let registry = VersionRegistry::load_all()?;
    let per = registry.lookup(X12_005010, "PER")?;

    let qualifier = per.element(3).expect("PER03").definition();
    assert!(Arc::ptr_eq(qualifier, per.element(5).expect("PER05").definition()));
    assert!(Arc::ptr_eq(qualifier, per.element(7).expect("PER07").definition()));
    assert_eq!(per.rules().len(), 3);
    Ok(())
}

#[test]
fn unsupported_version_fails_to_load() {
    let err = VersionRegistry::load(&CatalogConfig::only("003070")).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedVersion { .. }));
    insta::assert_snapshot!(err.to_string(), @"unsupported grammar version: 003070");
}

#[test]
fn empty_config_loads_nothing() -> Result<()> {
    let registry = VersionRegistry::load(&CatalogConfig::empty())?;
    assert!(registry.is_empty());
    assert_eq!(registry.segments(X12_005010).count(), 0);
    Ok(())
}
