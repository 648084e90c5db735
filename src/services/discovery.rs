//! Field discovery over a handler and its ancestors.

use crate::{
    domain::{ConfigurationError, RuleChain},
    ports::{CustomValidator, Element, Member, RequestHandler, is_custom_validator_name},
};
use std::{fmt, sync::Arc};
use tracing::debug;

/// How a discovered field is validated.
#[derive(Clone)]
pub enum FieldSpec {
    /// Evaluated by its rule chain against a resolved request value.
    RuleChain(RuleChain),
    /// Evaluated by a custom validator against the raw snapshot.
    Custom(Arc<dyn CustomValidator>),
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleChain(chain) => f.debug_tuple("RuleChain").field(chain).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A validated field found on a handler.
#[derive(Debug, Clone)]
pub struct DiscoveredField {
    name: String,
    spec: FieldSpec,
    depth: usize,
}

impl DiscoveredField {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the field is validated.
    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Returns the inheritance level the field was declared on; `0` is the
    /// handler itself.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` for custom validator fields.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self.spec, FieldSpec::Custom(_))
    }
}

/// Enumerates the validated fields of a handler hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDiscovery;

impl FieldDiscovery {
    /// Collects every validated field of `handler` and its ancestors.
    ///
    /// Own members come first in declaration order, followed by the parent's
    /// members, and so on up to the root. A name declared on several levels
    /// is yielded once per level. Rule arrays qualify as rule-chain fields;
    /// methods qualify when named like custom validators; everything else is
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonRuleElement`] when an array member
    /// holds anything other than rules, and
    /// [`ConfigurationError::NotCallable`] when a plain value is named like a
    /// custom validator.
    pub fn discover(
        handler: &dyn RequestHandler,
    ) -> Result<Vec<DiscoveredField>, ConfigurationError> {
        let mut fields = Vec::new();
        let mut level = Some(handler);
        let mut depth = 0;

        while let Some(current) = level {
            for (name, member) in current.members().iter() {
                if let Some(spec) = classify(name, member)? {
                    debug!(
                        field = %name,
                        depth,
                        custom = matches!(spec, FieldSpec::Custom(_)),
                        "discovered field"
                    );
                    fields.push(DiscoveredField {
                        name: name.to_owned(),
                        spec,
                        depth,
                    });
                }
            }
            level = current.parent();
            depth += 1;
        }

        Ok(fields)
    }
}

fn classify(name: &str, member: &Member) -> Result<Option<FieldSpec>, ConfigurationError> {
    match member {
        Member::Array(elements) => {
            rule_chain(name, elements).map(|chain| Some(FieldSpec::RuleChain(chain)))
        }
        Member::Method(validator) if is_custom_validator_name(name) => {
            Ok(Some(FieldSpec::Custom(Arc::clone(validator))))
        }
        Member::Value(_) if is_custom_validator_name(name) => {
            Err(ConfigurationError::NotCallable {
                field: name.to_owned(),
            })
        }
        Member::Method(_) | Member::Value(_) => Ok(None),
    }
}

fn rule_chain(name: &str, elements: &[Element]) -> Result<RuleChain, ConfigurationError> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| match element {
            Element::Rule(rule) => Ok(rule.clone()),
            Element::Other(_) => Err(ConfigurationError::NonRuleElement {
                field: name.to_owned(),
                index,
            }),
        })
        .collect()
}
