#![allow(dead_code)]

use std::sync::Once;

use edi_model::{
    CodeList, ElementDefinition, ElementType, Requirement, SegmentDefinition,
};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// SV6 with a mandatory coded qualifier (`AN`, `GA`) and an optional count.
pub fn anesthesia_service() -> SegmentDefinition {
    let qualifier = ElementDefinition::new(
        "235",
        "Product/Service ID Qualifier",
        ElementType::coded(CodeList::from_codes(["AN", "GA"]).expect("codes"), 2, 2)
            .expect("type"),
    )
    .expect("qualifier");
    let units = ElementDefinition::new(
        "380",
        "Quantity",
        ElementType::numeric(0, 1, 3).expect("type"),
    )
    .expect("units");

    SegmentDefinition::builder("SV6", "Anesthesia Service")
        .element(qualifier, Requirement::Mandatory)
        .element(units, Requirement::Optional)
        .build()
        .expect("SV6")
}
