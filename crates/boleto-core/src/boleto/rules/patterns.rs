//! Common regex patterns for boleto extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Taxpayer IDs, formatted
    pub static ref CNPJ_PATTERN: Regex = Regex::new(
        r"\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}"
    ).unwrap();

    pub static ref CPF_PATTERN: Regex = Regex::new(
        r"\d{3}\.\d{3}\.\d{3}-\d{2}"
    ).unwrap();

    // DD/MM/YYYY
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    // Amount behind a currency marker: "R$ 1.234,56", "Valor 99,90"
    pub static ref AMOUNT_WITH_MARKER: Regex = Regex::new(
        r"(?i)(?:R\$\s?|Valor\s?)([\d.]+,\d{2})"
    ).unwrap();

    // Bare amount token bounded by whitespace or text edges
    pub static ref AMOUNT_STANDALONE: Regex = Regex::new(
        r"(?:\s|^)(\d{1,3}(?:\.\d{3})*,\d{2})(?:\s|$)"
    ).unwrap();

    // Bank digit-line: 5.5 5.6 5.6 D VVVVVVVVVVVVVV
    pub static ref BARCODE_BANK: Regex = Regex::new(
        r"\d{5}\.?\d{5}[\s.]+\d{5}\.?\d{6}[\s.]+\d{5}\.?\d{6}[\s.]+\d[\s.]+\d{14}"
    ).unwrap();

    // Bank digit-line with the field separator shifted by a position
    pub static ref BARCODE_COMPACT_BANK: Regex = Regex::new(
        r"\d{9,10}\.?\d{1,2}[\s.]+\d{10,11}\.?\d{1,2}[\s.]+\d{10,11}\.?\d{1,2}[\s.]+\d[\s.]+\d{14}"
    ).unwrap();

    // Utility / government collection: four blocks of 11-12 digits plus check digit
    pub static ref BARCODE_COLLECTION: Regex = Regex::new(
        r"\d{11,12}[-\s]?\d[\s.]+\d{11,12}[-\s]?\d[\s.]+\d{11,12}[-\s]?\d[\s.]+\d{11,12}[-\s]?\d"
    ).unwrap();
}
