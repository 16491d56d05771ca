//! Tests for segment definition construction.

use std::sync::Arc;

use edi_model::{
    CodeList, ConditionalRule, DefinitionError, ElementDefinition, ElementType, Requirement,
    SegmentDefinition,
};
use proptest::prelude::*;

fn element(code: &str, element_type: ElementType) -> Arc<ElementDefinition> {
    Arc::new(ElementDefinition::new(code, format!("Element {code}"), element_type).expect("element"))
}

fn text(code: &str) -> Arc<ElementDefinition> {
    element(code, ElementType::string(1, 30).expect("type"))
}

#[test]
fn builds_segment_with_rules_and_shared_elements() {
    let contact = element("365", ElementType::identifier(2, 2).expect("type"));
    let number = text("364");

    let segment = SegmentDefinition::builder("PER", "Administrative Communications Contact")
        .purpose("To identify a person or office to whom communications should be directed")
        .element(
            element(
                "366",
                ElementType::coded(CodeList::from_codes(["IC"]).expect("codes"), 2, 2)
                    .expect("type"),
            ),
            Requirement::Mandatory,
        )
        .element(text("93"), Requirement::Optional)
        .element(Arc::clone(&contact), Requirement::situational("P0304"))
        .element(Arc::clone(&number), Requirement::situational("P0304"))
        .element(Arc::clone(&contact), Requirement::situational("P0506"))
        .element(Arc::clone(&number), Requirement::situational("P0506"))
        .rule(ConditionalRule::paired([3, 4]).expect("rule"))
        .rule(ConditionalRule::paired([5, 6]).expect("rule"))
        .build()
        .expect("build PER");

    assert_eq!(segment.len(), 6);
    assert_eq!(segment.id().as_str(), "PER");
    assert!(segment.rule("p0304").is_some());
    assert!(Arc::ptr_eq(
        segment.element(3).expect("PER03").definition(),
        segment.element(5).expect("PER05").definition()
    ));
}

#[test]
fn dangling_situational_reference_fails() {
    let err = SegmentDefinition::builder("REF", "Reference Information")
        .element(text("128"), Requirement::Mandatory)
        .element(text("127"), Requirement::situational("R0203"))
        .build()
        .expect_err("missing rule");
    assert_eq!(
        err,
        DefinitionError::UnknownRuleReference {
            segment_id: "REF".to_string(),
            position: 2,
            rule: "R0203".to_string(),
        }
    );
}

#[test]
fn situational_rule_must_cover_position() {
    let err = SegmentDefinition::builder("REF", "Reference Information")
        .element(text("128"), Requirement::situational("R0203"))
        .element(text("127"), Requirement::Optional)
        .element(text("352"), Requirement::Optional)
        .rule(ConditionalRule::at_least_one([2, 3]).expect("rule"))
        .build()
        .expect_err("uncovered position");
    assert!(matches!(
        err,
        DefinitionError::SituationalNotCovered { position: 1, .. }
    ));
}

#[test]
fn duplicate_rule_fails() {
    let err = SegmentDefinition::builder("DTP", "Date or Time Period")
        .element(text("374"), Requirement::Optional)
        .element(text("1250"), Requirement::Optional)
        .rule(ConditionalRule::paired([1, 2]).expect("rule"))
        .rule("P0102".parse().expect("note"))
        .build()
        .expect_err("duplicate");
    assert!(matches!(err, DefinitionError::DuplicateRule { .. }));
}

#[test]
fn invalid_segment_id_fails_at_build() {
    let err = SegmentDefinition::builder("sv6", "Anesthesia Service")
        .build()
        .expect_err("lowercase id");
    assert!(matches!(err, DefinitionError::InvalidSegmentId { .. }));
}

proptest! {
    #[test]
    fn out_of_range_rule_positions_fail(len in 1usize..8, extra in 1usize..5) {
        let mut builder = SegmentDefinition::builder("NTE", "Note");
        for index in 0..len {
            builder = builder.element(text(&format!("{}", 100 + index)), Requirement::Optional);
        }
        let beyond = len + extra;
        let rule = ConditionalRule::paired([1, beyond]).expect("rule");
        let err = builder.rule(rule).build().expect_err("out of range");
        prop_assert_eq!(
            err,
            DefinitionError::RuleOutOfRange {
                segment_id: "NTE".to_string(),
                rule: format!("P01{beyond:02}"),
                position: beyond,
                len,
            }
        );
    }

    #[test]
    fn contiguous_definitions_always_build(len in 0usize..12) {
        let mut builder = SegmentDefinition::builder("NTE", "Note");
        for index in 0..len {
            builder = builder.element(text(&format!("{}", 100 + index)), Requirement::Optional);
        }
        let segment = builder.build().expect("build");
        prop_assert_eq!(segment.len(), len);
        for (index, element) in segment.elements().iter().enumerate() {
            prop_assert_eq!(element.position(), index + 1);
        }
    }
}
