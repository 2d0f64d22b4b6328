//! Payer document (CNPJ / CPF) extraction.

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{CNPJ_PATTERN, CPF_PATTERN};

/// Payer document extractor.
///
/// A formatted CNPJ anywhere in the text wins over any CPF, regardless of
/// which appears first.
pub struct PayerDocumentExtractor;

impl PayerDocumentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PayerDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PayerDocumentExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CNPJ_PATTERN
            .find(text)
            .or_else(|| CPF_PATTERN.find(text))
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CNPJ_PATTERN
            .find_iter(text)
            .chain(CPF_PATTERN.find_iter(text))
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
            .collect()
    }
}

/// Extract the payer document from text.
pub fn extract_payer_document(text: &str) -> Option<String> {
    PayerDocumentExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cnpj() {
        let text = "Beneficiário: ACME LTDA CNPJ 12.345.678/0001-95";
        assert_eq!(extract_payer_document(text), Some("12.345.678/0001-95".to_string()));
    }

    #[test]
    fn test_extract_cpf() {
        let text = "Pagador: Fulano de Tal - CPF: 123.456.789-09";
        assert_eq!(extract_payer_document(text), Some("123.456.789-09".to_string()));
    }

    #[test]
    fn test_cnpj_wins_over_earlier_cpf() {
        let text = "Pagador 123.456.789-09\nBeneficiário 12.345.678/0001-95";
        assert_eq!(extract_payer_document(text), Some("12.345.678/0001-95".to_string()));
    }

    #[test]
    fn test_unformatted_ids_are_ignored() {
        assert_eq!(extract_payer_document("CPF 12345678909 CNPJ 12345678000195"), None);
    }

    #[test]
    fn test_extract_all_orders_cnpj_first() {
        let text = "123.456.789-09 12.345.678/0001-95 987.654.321-00";
        let results = PayerDocumentExtractor::new().extract_all(text);
        let values: Vec<&str> = results.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["12.345.678/0001-95", "123.456.789-09", "987.654.321-00"]);
        assert_eq!(results[1].position, Some((0, 14)));
    }
}
