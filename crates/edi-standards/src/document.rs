//! Declarative catalog documents.
//!
//! A document lists the element definitions of one grammar version and the
//! segments built from them:
//!
//! ```json
//! {
//!   "version": "005010",
//!   "elements": [
//!     {"code": "128", "name": "Reference Identification Qualifier", "type": "ID", "min": 2, "max": 3}
//!   ],
//!   "segments": [
//!     {"id": "REF", "name": "Reference Information", "purpose": "",
//!      "elements": [{"code": "128", "requirement": "M"}], "rules": []}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use edi_model::{
    CodeList, ConditionalRule, ElementDefinition, ElementKind, ElementType, Requirement,
    SegmentDefinition,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::registry::RegistryBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: String,
    #[serde(default)]
    pub elements: Vec<ElementDeclaration>,
    #[serde(default)]
    pub segments: Vec<SegmentDeclaration>,
}

/// One element definition. `type` is a representation code such as `ID`,
/// `AN`, `N2`, `R`, `DT` or `TM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDeclaration {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub representation: String,
    pub min: usize,
    pub max: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDeclaration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub elements: Vec<ElementUseDeclaration>,
    #[serde(default)]
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementUseDeclaration {
    pub code: String,
    /// `M`, `O` or `X:<syntax note>`.
    pub requirement: String,
}

impl ElementDeclaration {
    fn to_definition(&self) -> Result<ElementDefinition> {
        let mut kind: ElementKind = self.representation.parse()?;
        if let Some(codes) = &self.codes {
            match &mut kind {
                ElementKind::Identifier { codes: slot } => {
                    *slot = Some(CodeList::try_from(codes.clone())?);
                }
                _ => {
                    return Err(CatalogError::CodesOnNonIdentifier {
                        code: self.code.clone(),
                    });
                }
            }
        }
        let element_type = ElementType::new(kind, self.min, self.max)?;
        Ok(ElementDefinition::new(
            self.code.as_str(),
            self.name.as_str(),
            element_type,
        )?)
    }
}

impl SegmentDeclaration {
    fn to_definition(
        &self,
        elements: &BTreeMap<String, Arc<ElementDefinition>>,
    ) -> Result<SegmentDefinition> {
        let mut builder =
            SegmentDefinition::builder(self.id.as_str(), self.name.as_str()).purpose(&self.purpose);
        for element_use in &self.elements {
            let definition = elements.get(element_use.code.trim()).ok_or_else(|| {
                CatalogError::UndeclaredElement {
                    segment_id: self.id.clone(),
                    code: element_use.code.clone(),
                }
            })?;
            let requirement: Requirement = element_use.requirement.parse()?;
            builder = builder.element(Arc::clone(definition), requirement);
        }
        for note in &self.rules {
            let rule: ConditionalRule = note.parse()?;
            builder = builder.rule(rule);
        }
        Ok(builder.build()?)
    }
}

impl CatalogDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| CatalogError::Parse { source })
    }

    /// Build every declared segment, then register them into `builder`.
    ///
    /// # Errors
    ///
    /// Nothing is registered if any declaration is malformed, if an element
    /// code is declared twice, or if any segment conflicts with the builder.
    pub fn register_into(&self, builder: &mut RegistryBuilder) -> Result<usize> {
        let mut elements = BTreeMap::new();
        for declaration in &self.elements {
            let definition = Arc::new(declaration.to_definition()?);
            let code = definition.code().to_string();
            if elements.insert(code.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateElement { code });
            }
        }

        let segments = self
            .segments
            .iter()
            .map(|declaration| declaration.to_definition(&elements))
            .collect::<Result<Vec<_>>>()?;

        let count = segments.len();
        builder.register_all(&self.version, segments)?;
        debug!(
            version = %self.version,
            elements = elements.len(),
            segments = count,
            "registered catalog document"
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_on_string_element_are_rejected() {
        let declaration = ElementDeclaration {
            code: "352".to_string(),
            name: "Description".to_string(),
            representation: "AN".to_string(),
            min: 1,
            max: 80,
            codes: Some(BTreeMap::from([("A".to_string(), String::new())])),
        };
        let err = declaration.to_definition().unwrap_err();
        assert!(matches!(err, CatalogError::CodesOnNonIdentifier { .. }));
    }

    #[test]
    fn identifier_codes_attach_to_kind() {
        let declaration = ElementDeclaration {
            code: "1250".to_string(),
            name: "Date Time Period Format Qualifier".to_string(),
            representation: "ID".to_string(),
            min: 2,
            max: 3,
            codes: Some(BTreeMap::from([
                ("D8".to_string(), String::new()),
                ("RD8".to_string(), String::new()),
            ])),
        };
        let definition = declaration.to_definition().unwrap();
        let codes = definition.element_type().kind().code_list().unwrap();
        assert!(codes.contains("RD8"));
        assert_eq!(codes.len(), 2);
    }
}
