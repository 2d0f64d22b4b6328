//! Boleto record model and its spreadsheet row shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Known digit-line layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeLayout {
    /// Standard bank slip: 5.5 5.6 5.6 D + 14-digit value block.
    Bank,
    /// Bank slip whose field separators sit one position off.
    CompactBank,
    /// Utility bill / government collection: four 11-12 digit blocks.
    Collection,
}

impl BarcodeLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::CompactBank => "compact_bank",
            Self::Collection => "collection",
        }
    }
}

/// One boleto extracted from a page or a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// File name, with the page number for per-page extraction.
    pub source_label: String,

    /// Formatted CNPJ or CPF.
    pub payer_document: Option<String>,

    /// Latest date found inside the accepted year window.
    #[serde(with = "dmy_date")]
    pub due_date: Option<NaiveDate>,

    /// Largest amount found, zero when none.
    pub amount: Decimal,

    /// Digit-line with separators removed.
    pub barcode_digits: Option<String>,

    /// Layout the digit-line was recognized as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_layout: Option<BarcodeLayout>,
}

impl ExtractedRecord {
    /// Spreadsheet column order. Every row carries all five cells.
    pub const EXPORT_COLUMNS: [&'static str; 5] = [
        "source_label",
        "payer_document",
        "due_date",
        "amount",
        "barcode_digits",
    ];

    /// A record for `source_label` with every field absent.
    pub fn empty(source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
            payer_document: None,
            due_date: None,
            amount: Decimal::ZERO,
            barcode_digits: None,
            barcode_layout: None,
        }
    }

    /// A record without a digit-line, kept only in lenient extraction.
    pub fn is_pending(&self) -> bool {
        self.barcode_digits.is_none()
    }

    /// Render the record as cells in [`Self::EXPORT_COLUMNS`] order.
    pub fn export_row(&self) -> [String; 5] {
        [
            self.source_label.clone(),
            self.payer_document.clone().unwrap_or_default(),
            self.due_date
                .map(crate::boleto::rules::format_date)
                .unwrap_or_default(),
            format!("{:.2}", self.amount),
            self.barcode_digits.clone().unwrap_or_default(),
        ]
    }
}

mod dmy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::boleto::rules::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
