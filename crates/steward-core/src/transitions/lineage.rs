use super::{require_non_blank, update_by_id};
use crate::entities::LineageNode;
use crate::errors::CoreError;

/// Link business glossary terms to a lineage node.
///
/// Terms are trimmed, blanks dropped, duplicates removed (first occurrence
/// wins). Linking clears any earlier deferral.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if no non-blank term remains and
/// [`CoreError::NotFound`] for an unknown node.
pub fn link_business_terms(
    nodes: &[LineageNode],
    id: &str,
    terms: &[String],
) -> Result<Vec<LineageNode>, CoreError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !cleaned.iter().any(|existing| existing == term) {
            cleaned.push(term.to_string());
        }
    }
    if cleaned.is_empty() {
        return Err(CoreError::Validation(
            "at least one business term is required".to_string(),
        ));
    }

    update_by_id(nodes, id, |node| {
        Ok(LineageNode {
            business_terms: cleaned,
            business_terms_deferred: false,
            deferral_reason: None,
            ..node.clone()
        })
    })
}

/// Excuse a node from business-term linking for the current cycle.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if `reason` is blank and
/// [`CoreError::NotFound`] for an unknown node.
pub fn defer_business_terms(
    nodes: &[LineageNode],
    id: &str,
    reason: &str,
) -> Result<Vec<LineageNode>, CoreError> {
    require_non_blank(reason, "deferral reason")?;
    update_by_id(nodes, id, |node| {
        Ok(LineageNode {
            business_terms_deferred: true,
            deferral_reason: Some(reason.trim().to_string()),
            ..node.clone()
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::NodeType;

    fn node(id: &str) -> LineageNode {
        LineageNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            node_type: NodeType::StagingTable,
            related_cdes: Vec::new(),
            business_terms: Vec::new(),
            business_terms_deferred: false,
            deferral_reason: None,
        }
    }

    #[test]
    fn link_cleans_terms_and_clears_deferral() {
        let deferred = defer_business_terms(&[node("stg_loans")], "stg_loans", "vendor feed").unwrap();
        let terms = vec![
            " Exposure at Default ".to_string(),
            String::new(),
            "Exposure at Default".to_string(),
            "Counterparty".to_string(),
        ];
        let linked = link_business_terms(&deferred, "stg_loans", &terms).unwrap();

        assert_eq!(
            linked[0].business_terms,
            vec!["Exposure at Default".to_string(), "Counterparty".to_string()]
        );
        assert!(!linked[0].business_terms_deferred);
        assert_eq!(linked[0].deferral_reason, None);
    }

    #[test]
    fn link_requires_a_term() {
        let err = link_business_terms(&[node("n")], "n", &["  ".to_string()]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn defer_requires_reason() {
        let err = defer_business_terms(&[node("n")], "n", "   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
